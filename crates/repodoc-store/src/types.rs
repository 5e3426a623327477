//! User record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored user record.
///
/// The provider credential is server-side only: it is skipped whenever a
/// record is serialized, so it can never leak into an API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Internal identifier (UUID v4), assigned at creation.
    pub id: String,

    /// Provider-assigned identifier. Unique and immutable.
    pub github_id: i64,

    /// Provider handle.
    pub login: String,

    /// Display name, as reported at first login.
    pub name: Option<String>,

    /// Email address, as reported at first login.
    pub email: Option<String>,

    /// Avatar URL.
    pub avatar: Option<String>,

    /// Provider credential. Overwritten on every successful login.
    #[serde(skip_serializing, default)]
    pub access_token: Option<String>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Whether this record carries a usable provider credential.
    pub fn has_credential(&self) -> bool {
        self.access_token
            .as_deref()
            .is_some_and(|t| !t.is_empty())
    }
}

/// Profile fields captured from the provider at login time.
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    /// Provider-assigned identifier.
    pub github_id: i64,
    /// Provider handle.
    pub login: String,
    /// Display name.
    pub name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Avatar URL.
    pub avatar: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(token: Option<&str>) -> UserRecord {
        UserRecord {
            id: "u-1".to_string(),
            github_id: 42,
            login: "octocat".to_string(),
            name: None,
            email: None,
            avatar: None,
            access_token: token.map(String::from),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_has_credential() {
        assert!(record(Some("gho_abc")).has_credential());
        assert!(!record(Some("")).has_credential());
        assert!(!record(None).has_credential());
    }

    #[test]
    fn test_credential_never_serialized() {
        let json = serde_json::to_string(&record(Some("gho_secret"))).unwrap();
        assert!(!json.contains("gho_secret"));
        assert!(!json.contains("access_token"));
    }
}
