use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::validators::validate_email;

/// User entity - one record per email in the users table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Primary key, immutable once created
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_email"))]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,
}

impl User {
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

// An explicit `null` reads the same as a missing field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Query string accepted by GET and DELETE
///
/// GET /?email=jane@example.com
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    pub email: Option<String>,
}

impl UserQuery {
    /// Build from decoded `key=value` pairs; the last `email` wins
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let email = pairs
            .into_iter()
            .filter(|(key, _)| key == "email")
            .map(|(_, value)| value)
            .last();
        Self { email }
    }

    /// The requested email, treating `?email=` the same as no parameter
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.is_empty())
    }
}

/// Error envelope returned with every failed request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }
}

/// Primary key of the users table
#[derive(Debug, Serialize)]
pub(crate) struct UserKey<'a> {
    pub email: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_uses_camel_case_keys() {
        let user = User::new("a@b.com", "A", "B");
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            value,
            json!({"email": "a@b.com", "firstName": "A", "lastName": "B"})
        );
    }

    #[test]
    fn test_user_missing_fields_default_to_empty() {
        let user: User = serde_json::from_str(r#"{"email":"a@b.com"}"#).unwrap();
        assert_eq!(user.first_name, "");
        assert_eq!(user.last_name, "");
    }

    #[test]
    fn test_user_null_fields_default_to_empty() {
        let user: User =
            serde_json::from_str(r#"{"email":"a@b.com","firstName":null,"lastName":null}"#)
                .unwrap();
        assert_eq!(user, User::new("a@b.com", "", ""));
    }

    #[test]
    fn test_user_rejects_wrong_field_type() {
        assert!(serde_json::from_str::<User>(r#"{"email":"a@b.com","firstName":7}"#).is_err());
    }

    #[test]
    fn test_query_last_repeated_email_wins() {
        let pairs = [
            ("email".to_string(), "a@b.com".to_string()),
            ("stage".to_string(), "prod".to_string()),
            ("email".to_string(), "x@y.com".to_string()),
        ];
        assert_eq!(UserQuery::from_pairs(pairs).email(), Some("x@y.com"));
        assert_eq!(UserQuery::from_pairs(Vec::new()), UserQuery::default());
    }

    #[test]
    fn test_user_validate_rejects_bad_email() {
        assert!(User::new("not-an-email", "A", "B").validate().is_err());
        assert!(User::new("jane@example.com", "A", "B").validate().is_ok());
    }

    #[test]
    fn test_query_treats_empty_email_as_absent() {
        let query = UserQuery {
            email: Some(String::new()),
        };
        assert_eq!(query.email(), None);

        let query = UserQuery {
            email: Some("a@b.com".to_string()),
        };
        assert_eq!(query.email(), Some("a@b.com"));
    }

    #[test]
    fn test_error_body_omits_missing_message() {
        assert_eq!(serde_json::to_string(&ErrorBody::default()).unwrap(), "{}");
        assert_eq!(
            serde_json::to_string(&ErrorBody::new("user already exists")).unwrap(),
            r#"{"error":"user already exists"}"#
        );
    }
}
