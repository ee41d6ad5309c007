//! Domain logic for Cumbre, the personal goal tracker.
//!
//! Everything in this crate is DOM-free and runs natively, so the
//! contracts the UI relies on (validation, grouping, progress numbers,
//! session transitions) are unit-testable without a browser.

pub mod errors;
pub mod goal;
pub mod onboarding;
pub mod route;
pub mod session;
pub mod validate;
