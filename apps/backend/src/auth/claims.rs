//! Verified claim set decoded from an access token.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The full decoded claim set of a verified token. Lives for one request.
///
/// Kept as a raw JSON map because the identity provider attaches arbitrary
/// custom claims; only `sub` and `email` matter to this backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// Subject identifier. `None` when the claim is absent or blank.
    pub fn sub(&self) -> Option<&str> {
        self.0
            .get("sub")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    pub fn email(&self) -> Option<&str> {
        self.0
            .get("email")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
