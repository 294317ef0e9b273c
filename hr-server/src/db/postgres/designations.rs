use async_trait::async_trait;
use shared::models::{Designation, DesignationCreate, DesignationUpdate};
use shared::util::{now_millis, snowflake_id};

use super::PgStore;
use crate::db::{Repository, StoreResult};

#[async_trait]
impl Repository<Designation, DesignationCreate, DesignationUpdate> for PgStore {
    async fn list(&self) -> StoreResult<Vec<Designation>> {
        let rows = sqlx::query_as("SELECT * FROM designations ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Designation>> {
        let row = sqlx::query_as("SELECT * FROM designations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, data: DesignationCreate) -> StoreResult<Designation> {
        let now = now_millis();
        let row = sqlx::query_as(
            "INSERT INTO designations
                (id, designation_code, designation_name, department_code, level, description, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
             RETURNING *",
        )
        .bind(snowflake_id())
        .bind(&data.designation_code)
        .bind(&data.designation_name)
        .bind(&data.department_code)
        .bind(&data.level)
        .bind(&data.description)
        .bind(data.status)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i64, data: DesignationUpdate) -> StoreResult<Option<Designation>> {
        let row = sqlx::query_as(
            "UPDATE designations SET
                designation_name = COALESCE($2, designation_name),
                department_code = COALESCE($3, department_code),
                level = COALESCE($4, level),
                description = COALESCE($5, description),
                status = COALESCE($6, status),
                updated_at = $7
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&data.designation_name)
        .bind(&data.department_code)
        .bind(&data.level)
        .bind(&data.description)
        .bind(data.status)
        .bind(now_millis())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn toggle_status(&self, id: i64) -> StoreResult<Option<Designation>> {
        let row = sqlx::query_as(
            "UPDATE designations SET
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
        let result = sqlx::query("DELETE FROM designations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
