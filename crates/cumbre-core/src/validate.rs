//! Client-side form validation and text sanitization.

use thiserror::Error;

/// Symbols accepted by the password strength check.
const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// Maximum length of a goal title, in characters.
pub const MAX_TITLE_LEN: usize = 120;

/// Permissive email shape check: `local@domain.tld`, no whitespace.
/// Deliberately not an RFC validator.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Minimum 8 characters, one uppercase letter, one digit and one symbol.
/// No maximum length is enforced.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

/// Escape user-supplied text before it is embedded in markup.
///
/// This is the sole XSS defense: it must be applied at every
/// interpolation point (title, details, display name, username).
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Goal title validation failure. The `Display` string is the
/// user-facing message shown next to the field.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TitleError {
    #[error("Ingresa el nombre de la meta")]
    Empty,
    #[error("Maximo 120 caracteres")]
    TooLong,
}

/// A goal title is required and capped at [`MAX_TITLE_LEN`] characters.
pub fn validate_title(title: &str) -> Result<(), TitleError> {
    if title.is_empty() {
        return Err(TitleError::Empty);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(TitleError::TooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_accepts_minimal_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.example.com"));
    }

    #[test]
    fn email_rejects_embedded_whitespace() {
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@c .com"));
    }

    #[test]
    fn email_rejects_missing_parts() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn password_needs_uppercase_and_symbol() {
        assert!(!is_strong_password("abc12345"));
    }

    #[test]
    fn password_accepts_all_four_classes() {
        assert!(is_strong_password("Abcdef1!"));
    }

    #[test]
    fn password_uppercase_only_is_not_enough() {
        assert!(!is_strong_password("ALLUPPERX"));
        assert!(!is_strong_password("ALLUPPER1"));
        assert!(is_strong_password("ALLUPPER1!"));
    }

    #[test]
    fn password_enforces_minimum_length() {
        assert!(!is_strong_password("Ab1!"));
        assert!(is_strong_password("Ab1!Ab1!"));
    }

    #[test]
    fn escaping_renders_markup_inert() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html(r#"a & "b""#), "a &amp; &quot;b&quot;");
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn escaping_handles_already_escaped_input() {
        // Double-escaping is the safe direction.
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }

    #[test]
    fn title_boundary_at_120_characters() {
        let ok = "x".repeat(120);
        let too_long = "x".repeat(121);
        assert_eq!(validate_title(&ok), Ok(()));
        assert_eq!(validate_title(&too_long), Err(TitleError::TooLong));
        assert_eq!(
            TitleError::TooLong.to_string(),
            "Maximo 120 caracteres"
        );
    }

    #[test]
    fn title_is_required() {
        assert_eq!(validate_title(""), Err(TitleError::Empty));
        assert_eq!(
            TitleError::Empty.to_string(),
            "Ingresa el nombre de la meta"
        );
    }
}
