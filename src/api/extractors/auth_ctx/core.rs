use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::Principal;
use crate::state::AppState;

use super::AuthCtx;

/// Handler で認証済み Principal を受け取るための extractor
/// middleware が AuthCtx を request.extensions() に insert 済みである前提
/// anonymous / 未設定の場合は 401 (ErrorResponse) を返す
pub struct AuthCtxExtractor(pub Principal);

impl FromRequestParts<AppState> for AuthCtxExtractor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .and_then(AuthCtx::principal)
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or(AppError::Unauthorized)
    }
}
