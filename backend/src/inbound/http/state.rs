//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, RecipesCommand, RecipesQuery, RegistrationService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Recipe mutations.
    pub recipes: Arc<dyn RecipesCommand>,
    /// Recipe reads.
    pub recipes_query: Arc<dyn RecipesQuery>,
    /// Account creation.
    pub registration: Arc<dyn RegistrationService>,
    /// Credential checks.
    pub login: Arc<dyn LoginService>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// A single service usually backs both recipe ports, and another both
    /// account ports; pass the same `Arc` twice in that case.
    pub fn new(
        recipes: Arc<dyn RecipesCommand>,
        recipes_query: Arc<dyn RecipesQuery>,
        registration: Arc<dyn RegistrationService>,
        login: Arc<dyn LoginService>,
    ) -> Self {
        Self {
            recipes,
            recipes_query,
            registration,
            login,
        }
    }
}
