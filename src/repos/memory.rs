//! テスト用の in-memory repo (DB なしで router / middleware を通すため)

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repos::error::RepoError;
use crate::repos::offer_repo::{NewOffer, OfferRepository, OfferRow};
use crate::repos::user_repo::{UserDirectory, UserRecord};
use crate::services::auth::Role;

#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, UserRecord>>,
    lookups: AtomicUsize,
}

impl InMemoryUserDirectory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn put(&self, username: &str, roles: &[Role]) {
        self.users.write().await.insert(
            username.to_string(),
            UserRecord {
                username: username.to_string(),
                password_hash: "$2b$10$not-a-real-hash".to_string(),
                roles: roles.to_vec(),
            },
        );
    }

    pub async fn remove(&self, username: &str) {
        self.users.write().await.remove(username);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, RepoError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.read().await.get(username).cloned())
    }
}

/// 常に backend エラーを返す directory
pub struct FailingUserDirectory;

#[async_trait]
impl UserDirectory for FailingUserDirectory {
    async fn find_by_username(&self, _username: &str) -> Result<Option<UserRecord>, RepoError> {
        Err(RepoError::Db(sqlx::Error::PoolTimedOut))
    }
}

/// 応答が返ってこない directory (timeout 確認用)
pub struct StalledUserDirectory(pub Duration);

#[async_trait]
impl UserDirectory for StalledUserDirectory {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, RepoError> {
        tokio::time::sleep(self.0).await;
        Ok(Some(UserRecord {
            username: username.to_string(),
            password_hash: String::new(),
            roles: vec![Role::Admin],
        }))
    }
}

#[derive(Default)]
pub struct InMemoryOfferRepository {
    offers: RwLock<Vec<OfferRow>>,
}

impl InMemoryOfferRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl OfferRepository for InMemoryOfferRepository {
    async fn list(&self) -> Result<Vec<OfferRow>, RepoError> {
        Ok(self.offers.read().await.clone())
    }

    async fn get(&self, offer_id: Uuid) -> Result<Option<OfferRow>, RepoError> {
        Ok(self
            .offers
            .read()
            .await
            .iter()
            .find(|o| o.offer_id == offer_id)
            .cloned())
    }

    async fn create(&self, offer: NewOffer) -> Result<OfferRow, RepoError> {
        let mut offers = self.offers.write().await;
        if offers.iter().any(|o| o.offer_url == offer.offer_url) {
            return Err(RepoError::Conflict);
        }

        let row = OfferRow {
            offer_id: Uuid::new_v4(),
            title: offer.title,
            company: offer.company,
            salary: offer.salary,
            offer_url: offer.offer_url,
            created_at: Utc::now(),
        };
        offers.push(row.clone());
        Ok(row)
    }

    async fn delete(&self, offer_id: Uuid) -> Result<bool, RepoError> {
        let mut offers = self.offers.write().await;
        let before = offers.len();
        offers.retain(|o| o.offer_id != offer_id);
        Ok(offers.len() != before)
    }
}
