//! Session state machine.
//!
//! The auth provider fires a session-change event once on load and on
//! every sign-in/sign-out. Events are folded through [`Session`], which
//! also models the logout window explicitly: while `LoggingOut`, the
//! observer's redirect is swallowed so the goodbye animation can finish
//! and perform the navigation itself.

use serde::{Deserialize, Serialize};

/// Fields of the per-user profile document (`users/{uid}`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "displayName")]
    pub display_name: String,
}

/// The authenticated identity as reported by the auth provider.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Identity {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Session {
    #[default]
    SignedOut,
    SignedIn {
        identity: Identity,
        profile: Option<UserProfile>,
    },
    LoggingOut,
}

/// What the caller should render after folding an auth event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthAction {
    ShowDashboard,
    ShowLogin,
    Ignore,
}

impl Session {
    /// Fold one session-change event. Exactly the events delivered
    /// during `LoggingOut` are ignored; the logout flow navigates on
    /// its own and then calls [`Session::finish_logout`].
    pub fn on_auth_event(&mut self, identity: Option<Identity>) -> AuthAction {
        if matches!(self, Session::LoggingOut) {
            return AuthAction::Ignore;
        }
        match identity {
            Some(identity) => {
                *self = Session::SignedIn {
                    identity,
                    profile: None,
                };
                AuthAction::ShowDashboard
            }
            None => {
                *self = Session::SignedOut;
                AuthAction::ShowLogin
            }
        }
    }

    pub fn begin_logout(&mut self) {
        *self = Session::LoggingOut;
    }

    pub fn finish_logout(&mut self) {
        *self = Session::SignedOut;
    }

    pub fn set_profile(&mut self, new_profile: Option<UserProfile>) {
        if let Session::SignedIn { profile, .. } = self {
            *profile = new_profile;
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Session::SignedIn { identity, .. } => Some(identity),
            _ => None,
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            Session::SignedIn { profile, .. } => profile.as_ref(),
            _ => None,
        }
    }

    /// Best display name available: profile document, then the auth
    /// record's display name, then the email address.
    pub fn display_name(&self) -> Option<String> {
        let identity = self.identity()?;
        if let Some(p) = self.profile() {
            if !p.display_name.is_empty() {
                return Some(p.display_name.clone());
            }
        }
        if let Some(name) = &identity.display_name {
            if !name.is_empty() {
                return Some(name.clone());
            }
        }
        Some(identity.email.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(uid: &str) -> Identity {
        Identity {
            uid: uid.to_string(),
            email: format!("{uid}@correo.com"),
            display_name: None,
        }
    }

    #[test]
    fn signin_event_moves_to_dashboard() {
        let mut s = Session::SignedOut;
        assert_eq!(s.on_auth_event(Some(ident("u1"))), AuthAction::ShowDashboard);
        assert_eq!(s.identity().map(|i| i.uid.as_str()), Some("u1"));
    }

    #[test]
    fn signout_event_moves_to_login() {
        let mut s = Session::SignedIn {
            identity: ident("u1"),
            profile: None,
        };
        assert_eq!(s.on_auth_event(None), AuthAction::ShowLogin);
        assert_eq!(s, Session::SignedOut);
    }

    #[test]
    fn logging_out_swallows_the_spurious_event() {
        let mut s = Session::SignedIn {
            identity: ident("u1"),
            profile: None,
        };
        s.begin_logout();
        // The sign-out triggers one observer event; it must not redirect.
        assert_eq!(s.on_auth_event(None), AuthAction::Ignore);
        assert_eq!(s, Session::LoggingOut);

        // The goodbye callback clears the state; later events work again.
        s.finish_logout();
        assert_eq!(s.on_auth_event(None), AuthAction::ShowLogin);
        assert_eq!(s.on_auth_event(Some(ident("u2"))), AuthAction::ShowDashboard);
    }

    #[test]
    fn display_name_prefers_profile_then_auth_then_email() {
        let mut s = Session::SignedIn {
            identity: Identity {
                uid: "u1".into(),
                email: "u1@correo.com".into(),
                display_name: Some("Auth Name".into()),
            },
            profile: None,
        };
        assert_eq!(s.display_name().as_deref(), Some("Auth Name"));

        s.set_profile(Some(UserProfile {
            display_name: "Perfil Name".into(),
            ..UserProfile::default()
        }));
        assert_eq!(s.display_name().as_deref(), Some("Perfil Name"));

        let bare = Session::SignedIn {
            identity: ident("u2"),
            profile: None,
        };
        assert_eq!(bare.display_name().as_deref(), Some("u2@correo.com"));
        assert_eq!(Session::SignedOut.display_name(), None);
    }

    #[test]
    fn profile_document_deserializes_with_missing_fields() {
        let p: UserProfile =
            serde_json::from_str(r#"{"displayName":"Juan Perez","username":"@juan"}"#).unwrap();
        assert_eq!(p.display_name, "Juan Perez");
        assert_eq!(p.username, "@juan");
        assert_eq!(p.firstname, "");
        assert_eq!(p.email, "");
    }

    #[test]
    fn set_profile_is_a_noop_outside_signed_in() {
        let mut s = Session::SignedOut;
        s.set_profile(Some(UserProfile::default()));
        assert_eq!(s, Session::SignedOut);
    }
}
