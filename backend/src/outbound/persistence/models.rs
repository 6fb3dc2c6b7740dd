//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer; repositories convert them
//! to domain types before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{recipes, users};

/// Row struct for reading from the recipes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: Uuid,
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub preparation_time: f64,
    pub cook_time: f64,
    pub servings: f64,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new recipes. `created_at` comes from the column
/// default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct NewRecipeRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub ingredients: &'a [String],
    pub instructions: &'a str,
    pub preparation_time: f64,
    pub cook_time: f64,
    pub servings: f64,
}

/// Changeset replacing every editable recipe column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeUpdate<'a> {
    pub name: &'a str,
    pub ingredients: &'a [String],
    pub instructions: &'a str,
    pub preparation_time: f64,
    pub cook_time: f64,
    pub servings: f64,
}

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

/// Insertable struct for new accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}
