/*
 * Responsibility
 * - middleware の公開インターフェース
 * - 適用順 (外側から): http → cors → security_headers → auth::access → handler
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
