// src/repositories/postgres/vendors.rs
use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;
use crate::Error;
use gatherly_common::models::{VendorProfile, VendorServiceOffering};

#[async_trait]
pub trait VendorsRepository: Send + Sync {
    /// Active vendor profiles, optionally narrowed to one city.
    async fn list_active(&self, city: Option<&str>) -> Result<Vec<VendorProfile>, Error>;

    async fn services_for_vendor(
        &self,
        vendor_id: Uuid,
    ) -> Result<Vec<VendorServiceOffering>, Error>;
}

#[derive(Clone)]
pub struct PostgresVendorsRepository {
    pool: Pool<Postgres>,
}

impl PostgresVendorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VendorsRepository for PostgresVendorsRepository {
    async fn list_active(&self, city: Option<&str>) -> Result<Vec<VendorProfile>, Error> {
        let rows = match city {
            Some(c) => {
                sqlx::query_as::<_, VendorProfile>(
                    r#"
                    SELECT vendor_id, display_name, city, rating, review_count,
                           avg_response_minutes, acceptance_rate, is_active, created_at
                    FROM vendors
                    WHERE is_active = TRUE AND city = $1
                    ORDER BY vendor_id
                    "#,
                )
                    .bind(c)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_as::<_, VendorProfile>(
                    r#"
                    SELECT vendor_id, display_name, city, rating, review_count,
                           avg_response_minutes, acceptance_rate, is_active, created_at
                    FROM vendors
                    WHERE is_active = TRUE
                    ORDER BY vendor_id
                    "#,
                )
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows)
    }

    async fn services_for_vendor(
        &self,
        vendor_id: Uuid,
    ) -> Result<Vec<VendorServiceOffering>, Error> {
        let rows = sqlx::query_as::<_, VendorServiceOffering>(
            r#"
            SELECT vendor_service_id, vendor_id, service_type, price_min, price_max
            FROM vendor_services
            WHERE vendor_id = $1
            ORDER BY service_type
            "#,
        )
            .bind(vendor_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}
