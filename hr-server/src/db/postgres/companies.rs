use async_trait::async_trait;
use shared::models::{Company, CompanyCreate, CompanyUpdate};
use shared::util::{now_millis, snowflake_id};

use super::PgStore;
use crate::db::{Repository, StoreResult};

#[async_trait]
impl Repository<Company, CompanyCreate, CompanyUpdate> for PgStore {
    async fn list(&self) -> StoreResult<Vec<Company>> {
        let rows = sqlx::query_as("SELECT * FROM companies ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Company>> {
        let row = sqlx::query_as("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, data: CompanyCreate) -> StoreResult<Company> {
        let now = now_millis();
        let row = sqlx::query_as(
            "INSERT INTO companies
                (id, company_code, company_name, email, phone, address, city, state, country,
                 pincode, gst_number, pan_number, date_of_incorporation, status, created_by,
                 created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $16)
             RETURNING *",
        )
        .bind(snowflake_id())
        .bind(&data.company_code)
        .bind(&data.company_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.country)
        .bind(&data.pincode)
        .bind(&data.gst_number)
        .bind(&data.pan_number)
        .bind(data.date_of_incorporation)
        .bind(data.status)
        .bind(&data.created_by)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i64, data: CompanyUpdate) -> StoreResult<Option<Company>> {
        let row = sqlx::query_as(
            "UPDATE companies SET
                company_name = COALESCE($2, company_name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                address = COALESCE($5, address),
                city = COALESCE($6, city),
                state = COALESCE($7, state),
                country = COALESCE($8, country),
                pincode = COALESCE($9, pincode),
                gst_number = COALESCE($10, gst_number),
                pan_number = COALESCE($11, pan_number),
                date_of_incorporation = COALESCE($12, date_of_incorporation),
                status = COALESCE($13, status),
                updated_at = $14
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&data.company_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.country)
        .bind(&data.pincode)
        .bind(&data.gst_number)
        .bind(&data.pan_number)
        .bind(data.date_of_incorporation)
        .bind(data.status)
        .bind(now_millis())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn toggle_status(&self, id: i64) -> StoreResult<Option<Company>> {
        let row = sqlx::query_as(
            "UPDATE companies SET
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
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
