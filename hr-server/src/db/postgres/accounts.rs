use async_trait::async_trait;
use shared::models::{Account, ApprovalStatus};
use sqlx::types::Json;

use super::PgStore;
use crate::db::{AccountRecord, AccountStore, NewAccount, StoreResult};

#[derive(sqlx::FromRow)]
struct AccountRow {
    #[sqlx(flatten)]
    account: Account,
    password_hash: String,
}

const ACCOUNT_COLUMNS: &str = "id, email, full_name, role, status, profile, created_at";

#[async_trait]
impl AccountStore for PgStore {
    async fn insert(&self, new: NewAccount) -> StoreResult<Account> {
        let account = new.account;
        sqlx::query(
            "INSERT INTO accounts (id, email, password_hash, full_name, role, status, profile, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(&account.id)
        .bind(&account.email)
        .bind(&new.password_hash)
        .bind(&account.full_name)
        .bind(account.role)
        .bind(account.status)
        .bind(Json(&account.profile))
        .bind(account.created_at)
        .execute(&self.pool)
        .await?;
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<AccountRecord>> {
        let row: Option<AccountRow> = sqlx::query_as(&format!(
            "SELECT {ACCOUNT_COLUMNS}, password_hash FROM accounts WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| AccountRecord {
            account: r.account,
            password_hash: r.password_hash,
        }))
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Account>> {
        let account = sqlx::query_as(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    async fn list_by_status(&self, status: ApprovalStatus) -> StoreResult<Vec<Account>> {
        let accounts = sqlx::query_as(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE status = $1 ORDER BY created_at, id"
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(accounts)
    }

    async fn set_status(&self, id: &str, status: ApprovalStatus) -> StoreResult<Option<Account>> {
        let account = sqlx::query_as(&format!(
            "UPDATE accounts SET status = $2 WHERE id = $1 RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    async fn count_by_status(&self, status: ApprovalStatus) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }
}
