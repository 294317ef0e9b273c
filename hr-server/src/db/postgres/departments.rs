use async_trait::async_trait;
use shared::models::{Department, DepartmentCreate, DepartmentUpdate};
use shared::util::{now_millis, snowflake_id};

use super::PgStore;
use crate::db::{Repository, StoreResult};

#[async_trait]
impl Repository<Department, DepartmentCreate, DepartmentUpdate> for PgStore {
    async fn list(&self) -> StoreResult<Vec<Department>> {
        let rows = sqlx::query_as("SELECT * FROM departments ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Department>> {
        let row = sqlx::query_as("SELECT * FROM departments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, data: DepartmentCreate) -> StoreResult<Department> {
        let now = now_millis();
        let row = sqlx::query_as(
            "INSERT INTO departments (id, department_code, department_name, description, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING *",
        )
        .bind(snowflake_id())
        .bind(&data.department_code)
        .bind(&data.department_name)
        .bind(&data.description)
        .bind(data.status)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i64, data: DepartmentUpdate) -> StoreResult<Option<Department>> {
        let row = sqlx::query_as(
            "UPDATE departments SET
                department_name = COALESCE($2, department_name),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                updated_at = $5
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&data.department_name)
        .bind(&data.description)
        .bind(data.status)
        .bind(now_millis())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn toggle_status(&self, id: i64) -> StoreResult<Option<Department>> {
        let row = sqlx::query_as(
            "UPDATE departments SET
                status = CASE WHEN status = 'active' THEN 'inactive' ELSE 'active' END,
                updated_at = $2
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(now_millis())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
