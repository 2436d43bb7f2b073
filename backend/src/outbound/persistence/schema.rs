//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// User accounts table.
    ///
    /// Stores registered users with their login credentials and audit
    /// timestamps. The `id` column is the primary key (UUID v4).
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique lowercase login name (max 32 characters).
        username -> Varchar,
        /// Human-readable display name (max 32 characters).
        display_name -> Varchar,
        /// PHC-formatted password hash.
        password_hash -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Role grants held by users.
    ///
    /// One row per `(user, role)` pair; the composite primary key keeps
    /// grants naturally de-duplicated.
    user_roles (user_id, role) {
        /// Owning user; cascades on user deletion.
        user_id -> Uuid,
        /// Lowercase role name (`administrator` or `manager`).
        role -> Varchar,
        /// When the grant was recorded.
        granted_at -> Timestamptz,
    }
}

diesel::table! {
    /// Contact records table.
    ///
    /// Each contact belongs to exactly one owner and carries a workflow
    /// status. The `(created_at, id)` pair backs keyset pagination and is
    /// covered by a composite index.
    contacts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user; immutable after creation.
        owner_id -> Uuid,
        /// Contact name (max 100 characters).
        name -> Varchar,
        /// Street address line (max 200 characters).
        address -> Varchar,
        /// City name (max 100 characters).
        city -> Varchar,
        /// State or region name (max 100 characters).
        state -> Varchar,
        /// Postal code (max 32 characters).
        zip -> Varchar,
        /// Email address (max 254 characters).
        email -> Varchar,
        /// Workflow status (`submitted`, `approved`, or `rejected`).
        status -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Applied example data seed runs.
    ///
    /// Guards seeding idempotency: one row per seed key, inserted with
    /// `ON CONFLICT DO NOTHING` so repeated runs change nothing.
    seed_runs (seed_key) {
        /// Primary key: seed name from the registry.
        seed_key -> Varchar,
        /// When the seed was applied.
        seeded_at -> Timestamptz,
        /// Number of contacts generated for the run.
        contact_count -> Int4,
        /// RNG seed used for deterministic generation.
        seed -> Int8,
    }
}

diesel::joinable!(user_roles -> users (user_id));
diesel::joinable!(contacts -> users (owner_id));

diesel::allow_tables_to_appear_in_same_query!(users, user_roles, contacts, seed_runs);
