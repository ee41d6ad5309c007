//! Remote auth error codes mapped to user-facing messages.
//!
//! This table is the single source of truth for auth-related errors
//! across every screen. Unknown codes fall back to a generic retry
//! message; nothing else is ever shown to the user.

pub const GENERIC_AUTH_ERROR: &str = "Ocurrio un error. Intenta de nuevo.";

pub fn auth_message(code: &str) -> &'static str {
    match code {
        "auth/user-not-found" => "No existe una cuenta con este correo.",
        "auth/wrong-password" => "Contrasena incorrecta.",
        "auth/email-already-in-use" => "Este correo ya esta registrado.",
        "auth/invalid-email" => "El correo no es valido.",
        "auth/weak-password" => "La contrasena es demasiado debil.",
        "auth/too-many-requests" => "Demasiados intentos. Intenta mas tarde.",
        "auth/network-request-failed" => "Sin conexion. Verifica tu red.",
        "auth/invalid-credential" => "Credenciales incorrectas.",
        "auth/user-disabled" => "Esta cuenta ha sido deshabilitada.",
        _ => GENERIC_AUTH_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_fixed_sentences() {
        assert_eq!(auth_message("auth/wrong-password"), "Contrasena incorrecta.");
        assert_eq!(
            auth_message("auth/email-already-in-use"),
            "Este correo ya esta registrado."
        );
    }

    #[test]
    fn unknown_codes_fall_back_to_generic() {
        assert_eq!(auth_message("auth/something-new"), GENERIC_AUTH_ERROR);
        assert_eq!(auth_message(""), GENERIC_AUTH_ERROR);
    }
}
