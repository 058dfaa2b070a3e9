//! Unique test data generators.
//!
//! ULID-backed so parallel tests never collide on unique columns.

use ulid::Ulid;

/// `{prefix}-{ulid}`
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// `{prefix}-{ulid}@example.test`
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new())
}

/// A unique identity-provider subject in the `auth0|...` shape.
pub fn unique_sub() -> String {
    format!("auth0|{}", Ulid::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_str_is_unique() {
        assert_ne!(unique_str("user"), unique_str("user"));
    }

    #[test]
    fn unique_sub_has_provider_prefix() {
        assert!(unique_sub().starts_with("auth0|"));
    }
}
