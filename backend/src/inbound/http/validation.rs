//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every validation failure becomes `400 invalid_request` with a `details`
//! object naming the offending `field` and a snake_case `code`.

use pagination::PaginationError;
use serde_json::json;

use crate::domain::{Error, RecipeValidationError, UserValidationError};

/// Build the `invalid_request` error for a single field.
pub(crate) fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

impl From<RecipeValidationError> for Error {
    fn from(err: RecipeValidationError) -> Self {
        field_error(err.field(), err.code(), err.to_string())
    }
}

impl From<UserValidationError> for Error {
    fn from(err: UserValidationError) -> Self {
        field_error(err.field(), err.code(), err.to_string())
    }
}

pub(crate) fn pagination_error(err: &PaginationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "value": err.value(),
        "code": "invalid_pagination",
    }))
}
