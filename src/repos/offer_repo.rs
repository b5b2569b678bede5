/*
 * Responsibility
 * - offers CRUD (一覧 / 取得 / 作成 / 削除)
 * - offerUrl の unique 違反は RepoError::Conflict で返す
 *
 * 前提とするテーブル:
 *   offers ("offerId" UUID PK, title, company, salary, "offerUrl" UNIQUE, "createdAt")
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OfferRow {
    #[sqlx(rename = "offerId")]
    pub offer_id: Uuid,

    pub title: String,
    pub company: String,
    pub salary: String,

    #[sqlx(rename = "offerUrl")]
    pub offer_url: String,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOffer {
    pub title: String,
    pub company: String,
    pub salary: String,
    pub offer_url: String,
}

#[async_trait]
pub trait OfferRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<OfferRow>, RepoError>;
    async fn get(&self, offer_id: Uuid) -> Result<Option<OfferRow>, RepoError>;
    async fn create(&self, offer: NewOffer) -> Result<OfferRow, RepoError>;
    async fn delete(&self, offer_id: Uuid) -> Result<bool, RepoError>;
}

#[derive(Clone, Debug)]
pub struct PgOfferRepository {
    db: PgPool,
}

impl PgOfferRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OfferRepository for PgOfferRepository {
    async fn list(&self) -> Result<Vec<OfferRow>, RepoError> {
        let rows = sqlx::query_as::<_, OfferRow>(
            r#"
            SELECT "offerId", title, company, salary, "offerUrl", "createdAt"
            FROM offers
            ORDER BY "createdAt" DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    async fn get(&self, offer_id: Uuid) -> Result<Option<OfferRow>, RepoError> {
        let row = sqlx::query_as::<_, OfferRow>(
            r#"
            SELECT "offerId", title, company, salary, "offerUrl", "createdAt"
            FROM offers
            WHERE "offerId" = $1
            "#,
        )
        .bind(offer_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn create(&self, offer: NewOffer) -> Result<OfferRow, RepoError> {
        let row = sqlx::query_as::<_, OfferRow>(
            r#"
            INSERT INTO offers ("offerId", title, company, salary, "offerUrl")
            VALUES ($1, $2, $3, $4, $5)
            RETURNING "offerId", title, company, salary, "offerUrl", "createdAt"
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&offer.title)
        .bind(&offer.company)
        .bind(&offer.salary)
        .bind(&offer.offer_url)
        .fetch_one(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn delete(&self, offer_id: Uuid) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"
            DELETE FROM offers
            WHERE "offerId" = $1
            "#,
        )
        .bind(offer_id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
