//! PostgreSQL store
//!
//! One `PgStore` over a shared pool implements every store trait; the
//! queries for each table live in their own module.

mod accounts;
mod companies;
mod departments;
mod designations;
mod employees;

use sqlx::PgPool;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
