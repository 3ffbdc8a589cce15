//! Demo bearer tokens.
//!
//! A token is the fixed prefix followed by the decimal user id. It is a
//! lookup key, not a credential.

pub const TOKEN_PREFIX: &str = "demo-token-";

/// Mints the token for a fixture user.
#[must_use]
pub fn mint(user_id: u32) -> String {
    format!("{TOKEN_PREFIX}{user_id}")
}

/// Extracts the user id from a token in canonical form.
///
/// Returns `None` for a missing prefix, a non-numeric suffix, or a
/// non-canonical id such as `"007"` or `"+7"`.
#[must_use]
pub fn parse(token: &str) -> Option<u32> {
    let raw = token.strip_prefix(TOKEN_PREFIX)?;
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let id = raw.parse::<u32>().ok()?;
    (mint(id) == token).then_some(id)
}
