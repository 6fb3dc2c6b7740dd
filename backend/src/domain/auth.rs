//! Authentication primitives: login credentials and the authenticated
//! principal carried in a session.
//!
//! Handlers build [`LoginCredentials`] from request bodies before talking to
//! the login port, so the domain never sees raw JSON.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::{Role, UserId};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Credentials submitted to the login endpoint.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim, whitespace included.
///
/// # Examples
/// ```
/// use recipe_service::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" chef@example.com ", "S3cret!pw").unwrap();
/// assert_eq!(creds.username(), "chef@example.com");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username to look up.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Plaintext password to verify against the stored hash.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// The user a session is bound to, with the role granted at login.
///
/// The role is captured when the session is established; later role changes
/// apply from the next login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    user_id: UserId,
    role: Role,
}

impl Principal {
    /// Bind a user id to a role.
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Authenticated user.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Role granted at login.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether the principal holds `role`.
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn debug_output_hides_password() {
        let creds =
            LoginCredentials::try_from_parts("chef@example.com", "S3cret!pw").expect("valid");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("chef@example.com"));
        assert!(!rendered.contains("S3cret!pw"));
    }

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("chef@example.com", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  chef@example.com  ", "Secret1!")]
    #[case("cook@example.org", " spaced Pass1! ")]
    fn valid_credentials_trim_username(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username(), username.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    #[case(Role::Admin, Role::Admin, true)]
    #[case(Role::User, Role::Admin, false)]
    #[case(Role::User, Role::User, true)]
    fn principal_role_check(#[case] held: Role, #[case] wanted: Role, #[case] expected: bool) {
        let principal = Principal::new(UserId::random(), held);
        assert_eq!(principal.has_role(wanted), expected);
    }

    #[rstest]
    fn principal_serialises_for_session_storage() {
        let principal = Principal::new(UserId::random(), Role::Admin);
        let json = serde_json::to_string(&principal).expect("serialise principal");
        let back: Principal = serde_json::from_str(&json).expect("deserialise principal");
        assert_eq!(back, principal);
    }
}
