//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: binding a [`Principal`] at login, reading it
//! back, and enforcing the login and role checks.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Principal, Role, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const ROLE_KEY: &str = "role";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Bind the session to `principal`.
    ///
    /// The session key is renewed first so a pre-login cookie cannot be
    /// replayed as an authenticated one.
    pub fn persist_principal(&self, principal: &Principal) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, principal.user_id().to_string())
            .and_then(|()| self.0.insert(ROLE_KEY, principal.role().as_str()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the principal bound to this session, if any.
    ///
    /// Values that do not parse are treated as an anonymous session.
    pub fn principal(&self) -> Result<Option<Principal>, Error> {
        let read = |key: &str| {
            self.0
                .get::<String>(key)
                .map_err(|error| Error::internal(format!("failed to read session: {error}")))
        };
        let (Some(raw_id), Some(raw_role)) = (read(USER_ID_KEY)?, read(ROLE_KEY)?) else {
            return Ok(None);
        };
        let Some(user_id) = UserId::parse(&raw_id) else {
            tracing::warn!("invalid user id in session cookie");
            return Ok(None);
        };
        match raw_role.parse::<Role>() {
            Ok(role) => Ok(Some(Principal::new(user_id, role))),
            Err(error) => {
                tracing::warn!(%user_id, "invalid role in session cookie: {error}");
                Ok(None)
            }
        }
    }

    /// Require an authenticated session or return `401 Unauthorized`.
    pub fn require_user(&self) -> Result<Principal, Error> {
        self.principal()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require an authenticated session holding `role`.
    ///
    /// Anonymous sessions get `401 Unauthorized`; sessions with another role
    /// get `403 Forbidden`.
    pub fn require_role(&self, role: Role) -> Result<Principal, Error> {
        let principal = self.require_user()?;
        if !principal.has_role(role) {
            tracing::debug!(user_id = %principal.user_id(), required = %role, "role check failed");
            return Err(Error::forbidden("insufficient role"));
        }
        Ok(principal)
    }

    /// Drop every session value and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
