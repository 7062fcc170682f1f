//! Username rules shared by registration and the CLI.

use std::sync::LazyLock;

use regex::Regex;

use taskhub_entity::user::USERNAME_MAX_LENGTH;

static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+\z").expect("static pattern is valid"));

/// Check a submitted username, returning the first problem found.
///
/// Allowed are letters, digits, and `@ . + - _`, up to 150 characters.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("To polje je obvezno.".to_string());
    }
    let len = username.chars().count();
    if len > USERNAME_MAX_LENGTH {
        return Err(format!(
            "Poskrbite, da bo ta vrednost imela največ {USERNAME_MAX_LENGTH} znakov (trenutno jih ima {len})."
        ));
    }
    if !USERNAME_PATTERN.is_match(username) {
        return Err("Vnesite veljavno uporabniško ime. Vsebuje lahko samo črke, \
                    številke in znake @/./+/-/_."
            .to_string());
    }
    Ok(())
}
