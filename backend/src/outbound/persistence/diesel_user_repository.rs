//! PostgreSQL-backed user repository adapter.
//!
//! Implements the `UserRepository` port. Account creation inserts the user
//! row and any initial role grants in one transaction, so a failed grant
//! never leaves a half-created account behind.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::pooled_connection::bb8::PooledConnection;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{
    NewUserRecord, StoredCredentials, UserPersistenceError, UserRepository,
};
use crate::domain::{DisplayName, Role, User, UserId, Username};

use super::diesel_helpers::{DieselFailure, classify_diesel_error, map_pool_error_message};
use super::models::{CredentialsRow, NewUserRoleRow, NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{user_roles, users};

/// Diesel-backed implementation of the user repository.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new user repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> UserPersistenceError {
    match classify_diesel_error(error, operation) {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::NotFound => UserPersistenceError::query("record not found"),
        DieselFailure::UniqueViolation { message, .. } | DieselFailure::Query(message) => {
            UserPersistenceError::query(message)
        }
    }
}

/// Map a failed account insert, surfacing username collisions distinctly.
fn map_create_error(error: diesel::result::Error, username: &str) -> UserPersistenceError {
    let failure = classify_diesel_error(error, "create user");
    if failure.violates_constraint_on("username") {
        return UserPersistenceError::duplicate_username(username);
    }
    match failure {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::NotFound => UserPersistenceError::query("record not found"),
        DieselFailure::UniqueViolation { message, .. } | DieselFailure::Query(message) => {
            UserPersistenceError::query(message)
        }
    }
}

/// Rebuild a domain user from its stored row and role grants.
///
/// Stored rows passed domain validation on the way in, so a failure here
/// means the table was modified outside the application.
fn user_from_row(row: UserRow, roles: Vec<String>) -> Result<User, UserPersistenceError> {
    let invalid = |err: &dyn std::fmt::Display| {
        UserPersistenceError::query(format!("stored user is invalid: {err}"))
    };

    let roles = roles
        .into_iter()
        .map(|role| role.parse::<Role>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| invalid(&err))?;
    let username = Username::new(row.username).map_err(|err| invalid(&err))?;
    let display_name = DisplayName::new(row.display_name).map_err(|err| invalid(&err))?;

    Ok(User::new(
        UserId::from_uuid(row.id),
        username,
        display_name,
        roles,
    ))
}

async fn load_roles(
    conn: &mut PooledConnection<'_, AsyncPgConnection>,
    user_id: Uuid,
) -> Result<Vec<String>, diesel::result::Error> {
    user_roles::table
        .filter(user_roles::user_id.eq(user_id))
        .order(user_roles::role.asc())
        .select(user_roles::role)
        .load(conn)
        .await
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, record: &NewUserRecord) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let user_row = NewUserRow {
            id: *record.id.as_uuid(),
            username: record.username.as_ref(),
            display_name: record.display_name.as_ref(),
            password_hash: record.password_hash.as_str(),
        };
        let role_rows: Vec<NewUserRoleRow<'_>> = record
            .roles
            .iter()
            .map(|role| NewUserRoleRow {
                user_id: *record.id.as_uuid(),
                role: role.as_str(),
            })
            .collect();

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(users::table)
                    .values(&user_row)
                    .execute(conn)
                    .await?;

                if !role_rows.is_empty() {
                    diesel::insert_into(user_roles::table)
                        .values(&role_rows)
                        .execute(conn)
                        .await?;
                }

                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_create_error(err, record.username.as_ref()))?;

        Ok(User::new(
            record.id.clone(),
            record.username.clone(),
            record.display_name.clone(),
            record.roles.clone(),
        ))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(*id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find user by id"))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let roles = load_roles(&mut conn, row.id)
            .await
            .map_err(|err| map_diesel_error(err, "load user roles"))?;

        user_from_row(row, roles).map(Some)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find user by username"))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let roles = load_roles(&mut conn, row.id)
            .await
            .map_err(|err| map_diesel_error(err, "load user roles"))?;

        user_from_row(row, roles).map(Some)
    }

    async fn find_credentials(
        &self,
        username: &Username,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CredentialsRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(CredentialsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find credentials"))?;

        Ok(row.map(|row| StoredCredentials {
            user_id: UserId::from_uuid(row.id),
            password_hash: row.password_hash,
        }))
    }
}
