//! Cumbre — personal goal tracker, WASM entry point.
//!
//! The host page loads the Firebase compat SDK and this module. On
//! start we check for a password-reset deep link, otherwise install
//! the auth observer and let session events drive navigation.

use cumbre_core::route::Screen;
use cumbre_core::session::{AuthAction, Identity};
use gloo_console::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod auth_screens;
mod components;
mod dom;
mod firebase;
mod goals;
mod onboarding;
mod router;
mod settings;
mod state;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // Action links from reset emails bypass the session check.
    if let Some(screen) = router::deep_link_from_location() {
        router::navigate(screen);
        return;
    }

    components::show_loading("Cargando Cumbre...");

    let observer = Closure::wrap(Box::new(|user: JsValue| {
        spawn_local(on_auth_event(user));
    }) as Box<dyn FnMut(JsValue)>);
    firebase::auth().on_auth_state_changed(observer.as_ref().unchecked_ref());
    observer.forget();
}

/// Fold one auth observer event through the session machine and render
/// whatever it decides. Events during logout are swallowed; the
/// goodbye flow navigates on its own.
async fn on_auth_event(user: JsValue) {
    let identity = if user.is_null() || user.is_undefined() {
        None
    } else {
        let user: firebase::User = user.unchecked_into();
        Some(Identity {
            uid: user.uid(),
            email: user.email().unwrap_or_default(),
            display_name: user.display_name(),
        })
    };

    match state::with_session(|s| s.on_auth_event(identity)) {
        AuthAction::Ignore => {}
        AuthAction::ShowLogin => {
            components::hide_loading();
            router::navigate(Screen::Login);
        }
        AuthAction::ShowDashboard => {
            load_profile().await;
            components::hide_loading();
            router::navigate(Screen::Dashboard);
        }
    }
}

/// Fetch `users/{uid}` and cache it on the session. A missing or
/// unreadable document leaves the profile empty; the display name then
/// falls back to the auth record.
async fn load_profile() {
    let Some(identity) = state::identity() else {
        return;
    };
    match firebase::call(firebase::user_doc(&identity.uid).get()).await {
        Ok(snap) => {
            let snap: firebase::DocSnapshot = snap.unchecked_into();
            let profile = if snap.exists() {
                serde_wasm_bindgen::from_value(snap.data()).ok()
            } else {
                None
            };
            state::with_session(|s| s.set_profile(profile));
        }
        Err(code) => {
            warn!("profile load failed", code);
            state::with_session(|s| s.set_profile(None));
        }
    }
}
