//! Process-wide session state.
//!
//! WASM is single-threaded, so a `RefCell` in `thread_local!` storage
//! is enough; suspension points never observe a live borrow.

use cumbre_core::session::{Identity, Session, UserProfile};
use std::cell::RefCell;

thread_local! {
    static SESSION: RefCell<Session> = RefCell::new(Session::SignedOut);
}

/// Run a closure with mutable access to the session machine.
pub fn with_session<F, R>(f: F) -> R
where
    F: FnOnce(&mut Session) -> R,
{
    SESSION.with(|s| f(&mut s.borrow_mut()))
}

pub fn identity() -> Option<Identity> {
    SESSION.with(|s| s.borrow().identity().cloned())
}

pub fn profile() -> Option<UserProfile> {
    SESSION.with(|s| s.borrow().profile().cloned())
}

pub fn display_name() -> String {
    SESSION.with(|s| s.borrow().display_name()).unwrap_or_default()
}
