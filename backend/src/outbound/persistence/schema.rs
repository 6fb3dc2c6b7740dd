//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Stored recipes.
    ///
    /// `created_at` defaults to `now()` and, together with `id`, gives
    /// listings a stable order.
    recipes (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Trimmed, non-empty name.
        name -> Text,
        /// Ordered ingredient lines.
        ingredients -> Array<Text>,
        /// Free-form preparation steps.
        instructions -> Text,
        /// Preparation time in minutes.
        preparation_time -> Float8,
        /// Cooking time in minutes.
        cook_time -> Float8,
        /// Number of servings.
        servings -> Float8,
        /// Insertion timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registered accounts.
    ///
    /// `username` carries a unique index; `role` is constrained to `admin`
    /// or `user`.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Email address used to log in.
        username -> Varchar,
        /// bcrypt hash in modular crypt format.
        password_hash -> Text,
        /// Authorisation role.
        role -> Varchar,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(recipes, users);
