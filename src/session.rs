//! Session Storage
//!
//! Bearer token and username kept in `localStorage`.

use serde::{Deserialize, Serialize};

const TOKEN_KEY: &str = "token";
const USERNAME_KEY: &str = "username";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub username: String,
}

impl Session {
    /// Up to two upper-cased initials of the username's space-separated parts
    pub fn initials(&self) -> String {
        initials(&self.username)
    }
}

pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Session saved by a previous login, if any
pub fn load() -> Option<Session> {
    let storage = storage()?;
    let token = storage.get_item(TOKEN_KEY).ok()??;
    let username = storage.get_item(USERNAME_KEY).ok()?.unwrap_or_default();
    Some(Session { token, username })
}

pub fn save(session: &Session) {
    if let Some(storage) = storage() {
        if storage.set_item(TOKEN_KEY, &session.token).is_err()
            || storage.set_item(USERNAME_KEY, &session.username).is_err()
        {
            log::warn!("could not persist session");
        }
    }
}

pub fn clear() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USERNAME_KEY);
    }
}

/// Password strength from 0 to 4: length >= 8, uppercase, digit, symbol
pub fn password_strength(password: &str) -> u8 {
    let checks = [
        password.chars().count() >= 8,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    checks.iter().filter(|ok| **ok).count() as u8
}

pub fn strength_label(strength: u8) -> &'static str {
    match strength {
        0 | 1 => "Weak",
        2 => "Fair",
        3 => "Good",
        _ => "Strong",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("jane doe"), "JD");
        assert_eq!(initials("Ada"), "A");
        assert_eq!(initials("mary ann van dyke"), "MA");
        assert_eq!(initials("   "), "");
    }

    #[test]
    fn test_password_strength() {
        assert_eq!(password_strength(""), 0);
        assert_eq!(password_strength("abcdefgh"), 1);
        assert_eq!(password_strength("Abcdefgh"), 2);
        assert_eq!(password_strength("Abcdefg1"), 3);
        assert_eq!(password_strength("Abcdef1!"), 4);
        assert_eq!(password_strength("A1!"), 3);
        assert_eq!(strength_label(4), "Strong");
    }
}
