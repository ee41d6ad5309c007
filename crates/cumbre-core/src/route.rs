//! Screen identifiers and deep-link resolution.
//!
//! Navigation is a closed enum with an exhaustive match in the UI
//! layer, so adding a screen without wiring its renderer fails to
//! compile.

/// Query-string mode marker for the password-reset deep link.
pub const RESET_PASSWORD_MODE: &str = "resetPassword";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Recover,
    ResetPassword { oob_code: String },
    Dashboard,
    Settings,
    Help,
}

impl Screen {
    /// Screens that need an authenticated identity; the router falls
    /// back to the login screen when none is present.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Screen::Dashboard | Screen::Settings)
    }
}

/// Resolve an out-of-band action link from URL query parameters.
/// `?mode=resetPassword&oobCode=…` routes straight to the reset
/// confirmation screen, bypassing the normal session check.
pub fn deep_link(mode: Option<&str>, oob_code: Option<&str>) -> Option<Screen> {
    match (mode, oob_code) {
        (Some(m), Some(code)) if m == RESET_PASSWORD_MODE && !code.is_empty() => {
            Some(Screen::ResetPassword {
                oob_code: code.to_string(),
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_link_needs_both_parameters() {
        assert_eq!(
            deep_link(Some("resetPassword"), Some("abc123")),
            Some(Screen::ResetPassword {
                oob_code: "abc123".into()
            })
        );
        assert_eq!(deep_link(Some("resetPassword"), None), None);
        assert_eq!(deep_link(Some("resetPassword"), Some("")), None);
        assert_eq!(deep_link(None, Some("abc123")), None);
        assert_eq!(deep_link(Some("verifyEmail"), Some("abc123")), None);
    }

    #[test]
    fn only_dashboard_and_settings_require_auth() {
        assert!(Screen::Dashboard.requires_auth());
        assert!(Screen::Settings.requires_auth());
        assert!(!Screen::Login.requires_auth());
        assert!(!Screen::Register.requires_auth());
        assert!(!Screen::Recover.requires_auth());
        assert!(!Screen::Help.requires_auth());
        assert!(
            !Screen::ResetPassword {
                oob_code: "x".into()
            }
            .requires_auth()
        );
    }
}
