//! User accounts: identifiers, usernames, password policy and roles.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use zeroize::Zeroizing;

/// Symbols accepted (and one of which is required) in a password.
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";
/// Minimum password length in characters.
pub const PASSWORD_MIN_LEN: usize = 8;
/// Maximum username length, matching the email address limit.
pub const USERNAME_MAX_LEN: usize = 254;

/// Validation errors returned while building registration input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Username is not shaped like an email address.
    #[error("Please enter a valid email")]
    InvalidEmail,
    /// Password is shorter than [`PASSWORD_MIN_LEN`].
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Required minimum.
        min: usize,
    },
    /// Password contains a character outside letters, digits and
    /// [`PASSWORD_SYMBOLS`].
    #[error("password may only contain letters, digits and {PASSWORD_SYMBOLS}")]
    PasswordInvalidCharacter,
    /// Password lacks one of the required character classes.
    #[error(
        "password must contain a lowercase letter, an uppercase letter, a digit and one of {PASSWORD_SYMBOLS}"
    )]
    PasswordTooWeak,
    /// Role is not one of the enumerated values.
    #[error("role must be one of: admin, user")]
    InvalidRole,
}

impl UserValidationError {
    /// Wire name of the field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "username",
            Self::PasswordTooShort { .. } | Self::PasswordInvalidCharacter | Self::PasswordTooWeak => {
                "password"
            }
            Self::InvalidRole => "role",
        }
    }

    /// Stable snake_case code for error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "invalid_email",
            Self::PasswordTooShort { .. } => "password_too_short",
            Self::PasswordInvalidCharacter => "password_invalid_character",
            Self::PasswordTooWeak => "password_too_weak",
            Self::InvalidRole => "invalid_role",
        }
    }
}

/// Stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse an identifier from its string form; `None` when malformed.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }

    /// Wrap a UUID read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Local part per RFC 5322 atext; the domain needs at least one dot.
        let pattern = concat!(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+",
            r"@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?",
            r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
        );
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email-shaped login name.
///
/// # Examples
/// ```
/// use recipe_service::domain::Username;
///
/// assert!(Username::new("user@example.com").is_ok());
/// assert!(Username::new("not-an-email").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate a username, trimming surrounding whitespace.
    pub fn new(raw: &str) -> Result<Self, UserValidationError> {
        let trimmed = raw.trim();
        if trimmed.len() > USERNAME_MAX_LEN || !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        if trimmed.split('@').next().is_some_and(|local| {
            local.starts_with('.') || local.ends_with('.') || local.contains("..")
        }) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Rehydrate a username read back from storage without revalidating.
    pub fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Username as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plaintext password that satisfies the complexity policy.
///
/// The buffer is zeroed on drop and the value never appears in `Debug`
/// output.
#[derive(Clone)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Check `raw` against the complexity policy.
    pub fn new(raw: &str) -> Result<Self, UserValidationError> {
        if raw.chars().count() < PASSWORD_MIN_LEN {
            return Err(UserValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LEN,
            });
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c))
        {
            return Err(UserValidationError::PasswordInvalidCharacter);
        }
        let has_lower = raw.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = raw.chars().any(|c| c.is_ascii_uppercase());
        let has_digit = raw.chars().any(|c| c.is_ascii_digit());
        let has_symbol = raw.chars().any(|c| PASSWORD_SYMBOLS.contains(c));
        if !(has_lower && has_upper && has_digit && has_symbol) {
            return Err(UserValidationError::PasswordTooWeak);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Plaintext, for handing to a password hasher.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Salted one-way hash of a password, in the hasher's encoded format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(***)")
    }
}

/// Coarse permission label.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May create recipes.
    Admin,
    /// Default role for new accounts.
    #[default]
    User,
}

impl Role {
    /// Lowercase name used in storage, sessions and JSON.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(UserValidationError::InvalidRole),
        }
    }
}

/// Validated registration input, before the password is hashed.
#[derive(Debug, Clone)]
pub struct Registration {
    username: Username,
    password: Password,
    role: Role,
}

impl Registration {
    /// Validate raw registration fields. A missing role defaults to
    /// [`Role::User`].
    pub fn try_from_parts(
        username: &str,
        password: &str,
        role: Option<&str>,
    ) -> Result<Self, UserValidationError> {
        let username = Username::new(username)?;
        let password = Password::new(password)?;
        let role = role.map(str::parse).transpose()?.unwrap_or_default();
        Ok(Self {
            username,
            password,
            role,
        })
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Plaintext password.
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Requested role.
    pub fn role(&self) -> Role {
        self.role
    }
}

/// Account record ready for insertion: the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login name.
    pub username: Username,
    /// Hashed password.
    pub password_hash: PasswordHash,
    /// Assigned role.
    pub role: Role,
}

/// Stored account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    password_hash: PasswordHash,
    role: Role,
}

impl User {
    /// Assemble a user from stored parts.
    pub fn new(id: UserId, username: Username, password_hash: PasswordHash, role: Role) -> Self {
        Self {
            id,
            username,
            password_hash,
            role,
        }
    }

    /// Identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Hashed password.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Assigned role.
    pub fn role(&self) -> Role {
        self.role
    }
}
