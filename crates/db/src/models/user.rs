//! Tenant account model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use ens_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub password_hash: String,
}

/// DTO for replacing a user's credentials.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub name: String,
    pub password_hash: String,
}
