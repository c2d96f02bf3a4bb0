use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::database::User;

/// Request body for creating a user
///
/// Fields are optional at the decoding stage so that a missing or `null`
/// field is reported as a `required` validation error for that field instead
/// of an opaque decoding failure.
#[derive(Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Display name (non-empty)
    #[validate(required, length(min = 1))]
    #[schema(value_type = String, example = "Alice")]
    pub name: Option<String>,
    /// Email address
    #[validate(required, email)]
    #[schema(value_type = String, example = "alice@example.com")]
    pub email: Option<String>,
    /// Password, stored as provided
    #[validate(required, length(min = 1))]
    #[schema(value_type = String, example = "secret123")]
    pub password: Option<String>,
}

/// A create-user request that passed validation
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// User information returned in API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Unique user ID
    pub id: i64,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// When the user was created
    pub created_at: DateTime<Utc>,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = ValidationErrors;

    fn try_from(req: CreateUserRequest) -> Result<Self, Self::Error> {
        req.validate()?;

        match (req.name, req.email, req.password) {
            (Some(name), Some(email), Some(password)) => Ok(NewUser {
                name,
                email: normalize_email(&email),
                password,
            }),
            (name, email, password) => {
                let mut errors = ValidationErrors::new();
                for (field, missing) in [
                    ("name", name.is_none()),
                    ("email", email.is_none()),
                    ("password", password.is_none()),
                ] {
                    if missing {
                        errors.add(field, ValidationError::new("required"));
                    }
                }
                Err(errors)
            }
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// Domain names are case-insensitive; the local part is left untouched
fn normalize_email(email: &str) -> String {
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: serde_json::Value) -> CreateUserRequest {
        serde_json::from_value(body).expect("request should decode")
    }

    fn error_codes(errors: &ValidationErrors, field: &str) -> Vec<String> {
        errors
            .field_errors()
            .get(field)
            .map(|errs| errs.iter().map(|e| e.code.to_string()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_valid_request_converts() {
        let user = NewUser::try_from(request(json!({
            "name": "Alice",
            "email": "alice@example.com",
            "password": "secret123"
        })))
        .unwrap();

        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.password, "secret123");
    }

    #[test]
    fn test_email_domain_is_lowercased() {
        let user = NewUser::try_from(request(json!({
            "name": "Alice",
            "email": "Alice.Smith@Example.COM",
            "password": "secret123"
        })))
        .unwrap();

        assert_eq!(user.email, "Alice.Smith@example.com");
    }

    #[test]
    fn test_missing_fields_are_required() {
        let errors = NewUser::try_from(request(json!({}))).unwrap_err();

        for field in ["name", "email", "password"] {
            assert_eq!(error_codes(&errors, field), vec!["required"], "field {}", field);
        }
    }

    #[test]
    fn test_null_field_is_required() {
        let errors = NewUser::try_from(request(json!({
            "name": null,
            "email": "alice@example.com",
            "password": "secret123"
        })))
        .unwrap_err();

        assert_eq!(error_codes(&errors, "name"), vec!["required"]);
        assert!(error_codes(&errors, "email").is_empty());
    }

    #[test]
    fn test_empty_name_and_password_rejected() {
        let errors = NewUser::try_from(request(json!({
            "name": "",
            "email": "alice@example.com",
            "password": ""
        })))
        .unwrap_err();

        assert_eq!(error_codes(&errors, "name"), vec!["length"]);
        assert_eq!(error_codes(&errors, "password"), vec!["length"]);
    }

    #[test]
    fn test_malformed_emails_rejected() {
        for email in ["not-an-email", "alice@", "@example.com", "alice example.com"] {
            let errors = NewUser::try_from(request(json!({
                "name": "Bob",
                "email": email,
                "password": "x"
            })))
            .unwrap_err();

            assert_eq!(error_codes(&errors, "email"), vec!["email"], "email {:?}", email);
            assert!(error_codes(&errors, "name").is_empty());
        }
    }

    #[test]
    fn test_response_never_contains_password() {
        let user = User {
            id: 7,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret123".to_string(),
            created_at: Utc::now(),
        };

        let body = serde_json::to_value(UserResponse::from(user)).unwrap();
        let object = body.as_object().unwrap();

        assert_eq!(object.len(), 4);
        assert_eq!(body["id"], 7);
        assert_eq!(body["email"], "alice@example.com");
        assert!(!object.contains_key("password"));
        assert!(!body.to_string().contains("secret123"));
    }
}
