use async_trait::async_trait;
use shared::client::EmployeeCount;
use shared::models::{Employee, EmployeeCreate, EmployeeStatus, EmployeeUpdate};
use shared::util::{now_millis, snowflake_id};

use super::PgStore;
use crate::db::{EmployeeStore, Repository, StoreError, StoreResult};

#[async_trait]
impl Repository<Employee, EmployeeCreate, EmployeeUpdate> for PgStore {
    async fn list(&self) -> StoreResult<Vec<Employee>> {
        let rows = sqlx::query_as("SELECT * FROM employees ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Employee>> {
        let row = sqlx::query_as("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, data: EmployeeCreate) -> StoreResult<Employee> {
        let now = now_millis();
        let row = sqlx::query_as(
            "INSERT INTO employees
                (id, full_name, email, phone, gender, dob, joining_date, department, designation,
                 address, profile_pic_url, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
             RETURNING *",
        )
        .bind(snowflake_id())
        .bind(&data.full_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(data.gender)
        .bind(data.dob)
        .bind(data.joining_date)
        .bind(&data.department)
        .bind(&data.designation)
        .bind(&data.address)
        .bind(&data.profile_pic_url)
        .bind(data.status)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i64, data: EmployeeUpdate) -> StoreResult<Option<Employee>> {
        let row = sqlx::query_as(
            "UPDATE employees SET
                full_name = COALESCE($2, full_name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                gender = COALESCE($5, gender),
                dob = COALESCE($6, dob),
                joining_date = COALESCE($7, joining_date),
                department = COALESCE($8, department),
                designation = COALESCE($9, designation),
                address = COALESCE($10, address),
                profile_pic_url = COALESCE($11, profile_pic_url),
                status = COALESCE($12, status),
                updated_at = $13
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&data.full_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(data.gender)
        .bind(data.dob)
        .bind(data.joining_date)
        .bind(&data.department)
        .bind(&data.designation)
        .bind(&data.address)
        .bind(&data.profile_pic_url)
        .bind(data.status)
        .bind(now_millis())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Onboarding and resigned employees are left alone; the row is locked
    /// while the next status is decided.
    async fn toggle_status(&self, id: i64) -> StoreResult<Option<Employee>> {
        let mut tx = self.pool.begin().await?;

        let current: Option<EmployeeStatus> =
            sqlx::query_scalar("SELECT status FROM employees WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(current) = current else {
            return Ok(None);
        };
        let next = current.toggled().ok_or_else(|| {
            StoreError::Validation(format!("cannot toggle {current} employee"))
        })?;

        let row = sqlx::query_as(
            "UPDATE employees SET status = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(next)
        .bind(now_millis())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(row))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct CountRow {
    total: i64,
    active: i64,
    onboarding: i64,
}

#[async_trait]
impl EmployeeStore for PgStore {
    async fn count(&self) -> StoreResult<EmployeeCount> {
        let row: CountRow = sqlx::query_as(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'active') AS active,
                COUNT(*) FILTER (WHERE status = 'onboarding') AS onboarding
             FROM employees",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(EmployeeCount {
            total: row.total as u64,
            active: row.active as u64,
            onboarding: row.onboarding as u64,
        })
    }
}
