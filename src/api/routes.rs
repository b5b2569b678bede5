/*
 * Responsibility
 * - URL 構造を定義 (/health, /api/offers)
 * - 認証/認可は route 単位ではなく app 全体に掛ける (middleware::auth::access)
 *   どの path が PUBLIC / ADMIN かは AccessPolicy の rule table が決める
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::handlers::{
    health::health,
    offers::{create_offer, delete_offer, get_offer, list_offers},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/offers", get(list_offers).post(create_offer))
        .route("/api/offers/{id}", get(get_offer).delete(delete_offer))
}
