//! Screen router.
//!
//! Every navigation tears down the live goal subscription, applies the
//! auth guard and hands the cleared `#app` container to one renderer.
//! The match is exhaustive over [`Screen`], so an unwired screen is a
//! compile error.

use cumbre_core::route::{self, Screen};

use crate::{auth_screens, dom, goals, settings, state};

pub fn navigate(screen: Screen) {
    goals::cancel_subscription();

    let screen = if screen.requires_auth() && state::identity().is_none() {
        Screen::Login
    } else {
        screen
    };

    let app = dom::app_root();
    app.set_inner_html("");
    match screen {
        Screen::Login => auth_screens::render_login(&app),
        Screen::Register => auth_screens::render_register(&app),
        Screen::Recover => auth_screens::render_recover(&app),
        Screen::ResetPassword { oob_code } => auth_screens::render_reset_password(&app, &oob_code),
        Screen::Dashboard => goals::render_dashboard(&app),
        Screen::Settings => settings::render_settings(&app),
        Screen::Help => settings::render_help(&app),
    }
}

/// Out-of-band action link in the current URL, if any.
pub fn deep_link_from_location() -> Option<Screen> {
    let search = dom::window().location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    route::deep_link(params.get("mode").as_deref(), params.get("oobCode").as_deref())
}
