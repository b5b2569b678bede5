/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: 検証鍵 / rule table (起動後は読み取り専用)
 *   - users / offers: repo (trait object。テストでは in-memory に差し替え)
 * - Clone 前提で持つ (内部は Arc で Clone cheap)
 */
use std::sync::Arc;

use crate::repos::{OfferRepository, UserDirectory};
use crate::services::auth::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub users: Arc<dyn UserDirectory>,
    pub offers: Arc<dyn OfferRepository>,
}

impl AppState {
    pub fn new(
        auth: Arc<AuthService>,
        users: Arc<dyn UserDirectory>,
        offers: Arc<dyn OfferRepository>,
    ) -> Self {
        Self {
            auth,
            users,
            offers,
        }
    }
}
