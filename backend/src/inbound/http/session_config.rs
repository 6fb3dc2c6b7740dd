//! Session configuration parsing and validation.
//!
//! Cookie sessions are configured from the environment. Debug builds tolerate
//! missing or malformed toggles and fall back with a warning; release builds
//! refuse to start until every toggle is explicit and valid.

pub mod fingerprint;

use std::path::PathBuf;
use std::time::Duration;

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite, time};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
// Key derivation needs at least this much material in any build.
const SESSION_KEY_DEBUG_MIN_LEN: usize = 32;
const SESSION_COOKIE_NAME: &str = "session";
/// Default lifetime of an authenticated session.
pub const SESSION_TTL_DEFAULT: Duration = Duration::from_secs(24 * 60 * 60);

const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const TTL_HOURS_ENV: &str = "SESSION_TTL_HOURS";

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";
const HOURS_EXPECTED: &str = "a positive whole number of hours";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for missing toggles.
    Debug,
    /// Release builds require explicit, valid session toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_service::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }

    /// Use `fallback` in debug builds (after warning), fail otherwise.
    fn tolerate<T>(
        self,
        fallback: T,
        error: SessionConfigError,
        warning: impl FnOnce(),
    ) -> Result<T, SessionConfigError> {
        if self.is_debug() {
            warning();
            Ok(fallback)
        } else {
            Err(error)
        }
    }
}

/// Validated cookie session settings.
#[derive(Clone)]
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// Configured `SameSite` policy for session cookies.
    pub same_site: SameSite,
    /// How long a session cookie stays valid after it is issued.
    pub ttl: Duration,
}

impl SessionSettings {
    /// Build the session middleware described by these settings.
    ///
    /// Cookie contents are encrypted, so clients can neither read nor forge
    /// the stored user id and role.
    pub fn middleware(&self) -> SessionMiddleware<CookieSessionStore> {
        let ttl = time::Duration::seconds(i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX));
        SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name(SESSION_COOKIE_NAME.to_owned())
            .cookie_content_security(CookieContentSecurity::Private)
            .cookie_http_only(true)
            .cookie_secure(self.cookie_secure)
            .cookie_same_site(self.same_site)
            .session_lifecycle(PersistentSession::default().session_ttl(ttl))
            .build()
    }

    /// Fingerprint of the active key, safe to log.
    pub fn key_fingerprint(&self) -> String {
        fingerprint::key_fingerprint(&self.key)
    }
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv {
        /// Variable name.
        name: &'static str,
    },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Value found in the environment.
        value: String,
        /// Description of the accepted values.
        expected: &'static str,
    },
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        /// Key file location.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The session key file exists but is too short for the build mode.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        /// Key file location.
        path: PathBuf,
        /// Bytes found.
        length: usize,
        /// Bytes required.
        min_len: usize,
    },
    /// `SameSite=None` requires a secure cookie setting in release builds.
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    /// Release builds must not allow ephemeral session keys.
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build session settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use recipe_service::inbound::http::session_config::{
///     session_settings_from_env, BuildMode,
/// };
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("recipes_session_key_example");
/// std::fs::write(&key_path, vec![b'k'; 64])?;
///
/// let key_path = key_path.to_str().expect("valid path").to_string();
/// let mut env = MockEnv::new();
/// env.expect_string()
///     .returning(move |name| match name {
///         "SESSION_KEY_FILE" => Some(key_path.clone()),
///         "SESSION_COOKIE_SECURE" => Some("1".to_string()),
///         "SESSION_SAMESITE" => Some("Strict".to_string()),
///         "SESSION_ALLOW_EPHEMERAL" => Some("0".to_string()),
///         _ => None,
///     });
///
/// let settings = session_settings_from_env(&env, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
/// assert_eq!(settings.ttl.as_secs(), 24 * 60 * 60);
/// # Ok(())
/// # }
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = bool_from_env(env, mode, COOKIE_SECURE_ENV, true)?;
    let same_site = same_site_from_env(env, mode, cookie_secure)?;
    let allow_ephemeral = bool_from_env(env, mode, ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let ttl = ttl_from_env(env, mode)?;
    let key = session_key_from_env(env, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
        ttl,
    })
}

fn bool_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    fallback: bool,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(name) else {
        return mode.tolerate(fallback, SessionConfigError::MissingEnv { name }, || {
            warn!("{name} not set; defaulting to {fallback}");
        });
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None => {
            let error = SessionConfigError::InvalidEnv {
                name,
                value: value.clone(),
                expected: BOOL_EXPECTED,
            };
            mode.tolerate(fallback, error, || {
                warn!(value = %value, "invalid {name}; defaulting to {fallback}");
            })
        }
    }
}

fn same_site_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let fallback = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let Some(value) = env.string(SAMESITE_ENV) else {
        return mode.tolerate(
            fallback,
            SessionConfigError::MissingEnv { name: SAMESITE_ENV },
            || warn!("SESSION_SAMESITE not set; using default"),
        );
    };

    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => mode.tolerate(
            SameSite::None,
            SessionConfigError::InsecureSameSiteNone,
            || {
                warn!(
                    "SESSION_SAMESITE=None with SESSION_COOKIE_SECURE=0; browsers may reject the cookie"
                );
            },
        ),
        _ => {
            let error = SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value: value.clone(),
                expected: SAMESITE_EXPECTED,
            };
            mode.tolerate(fallback, error, || {
                warn!(value = %value, "invalid SESSION_SAMESITE, using default");
            })
        }
    }
}

/// Session lifetime; optional in every build mode.
fn ttl_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Duration, SessionConfigError> {
    let Some(value) = env.string(TTL_HOURS_ENV) else {
        return Ok(SESSION_TTL_DEFAULT);
    };
    match value.trim().parse::<u64>() {
        Ok(hours) if hours > 0 => Ok(Duration::from_secs(hours.saturating_mul(60 * 60))),
        _ => {
            let error = SessionConfigError::InvalidEnv {
                name: TTL_HOURS_ENV,
                value: value.clone(),
                expected: HOURS_EXPECTED,
            };
            mode.tolerate(SESSION_TTL_DEFAULT, error, || {
                warn!(value = %value, "invalid SESSION_TTL_HOURS, using 24 hours");
            })
        }
    }
}

fn session_key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );

    let mut bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            return Ok(Key::generate());
        }
        Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
    };

    let length = bytes.len();
    let min_len = if mode.is_debug() {
        SESSION_KEY_DEBUG_MIN_LEN
    } else {
        SESSION_KEY_MIN_LEN
    };
    let result = if length < min_len {
        Err(SessionConfigError::KeyTooShort {
            path,
            length,
            min_len,
        })
    } else {
        Ok(Key::derive_from(&bytes))
    };
    bytes.zeroize();
    result
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
