//! Request Gate: bearer token → AuthCtx → access decision → handler or failure responder.
//!
//! Pipeline per request (linear, runs once):
//! 1. `Authorization: Bearer <jwt>` を取り出す。無い / scheme 違いは anonymous で続行
//! 2. 署名 + exp を検証。失敗 (TokenError) は投げずに anonymous へ落とす
//! 3. sub を User Directory で引き直して現在の roles を得る
//!    (未登録 / lookup 失敗 / timeout は anonymous。retry しない)
//! 4. AuthCtx を確定し、AccessPolicy で判定
//! 5. Allow → AuthCtx を extensions に入れて next へ。Deny → failure responder で終了
//!
//! 公開 route に壊れたトークン付きで来ても 2 で失敗するだけなので、判定は 4 に任せる。

use axum::{
    Router,
    body::Body,
    extract::{OriginalUri, State},
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::middleware::auth::failure;
use crate::services::auth::{Decision, Principal};
use crate::state::AppState;

/// Router 全体 (fallback を含む) に Request Gate を掛ける。
///
/// 例：
/// ```ignore
/// let router = api::routes();
/// let router = middleware::auth::access::apply(router, state.clone()).with_state(state);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

/// 同じリクエストに gate が二重に掛かった場合の目印
#[derive(Debug, Clone, Copy)]
struct GatePassed;

async fn access_middleware(
    State(state): State<AppState>,
    OriginalUri(original_uri): OriginalUri,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if req.extensions().get::<GatePassed>().is_some() {
        return next.run(req).await;
    }
    req.extensions_mut().insert(GatePassed);

    let ctx = resolve_auth_ctx(&state, req.headers()).await;

    let method = req.method().clone();
    let path = original_uri.path();

    match state.auth.policy().decide(&method, path, &ctx) {
        Decision::Allow => {
            tracing::debug!(
                %method,
                path,
                authenticated = ctx.is_authenticated(),
                "access granted"
            );
            // middleware → extractor への受け渡し
            req.extensions_mut().insert(ctx);
            next.run(req).await
        }
        Decision::Deny(denial) => failure::respond(denial, &method, path, &ctx),
    }
}

/// Token 検証 + directory 再解決。どの失敗も anonymous に落とす (fail closed)。
async fn resolve_auth_ctx(state: &AppState, headers: &HeaderMap) -> AuthCtx {
    let Some(token) = bearer_token(headers) else {
        return AuthCtx::anonymous();
    };

    let verified = match state.auth.verify(token) {
        Ok(verified) => verified,
        Err(err) => {
            tracing::debug!(error = %err, "access token rejected, continuing as anonymous");
            return AuthCtx::anonymous();
        }
    };

    let timeout = state.auth.user_lookup_timeout();
    let lookup =
        tokio::time::timeout(timeout, state.users.find_by_username(&verified.subject)).await;

    match lookup {
        Ok(Ok(Some(user))) => AuthCtx::authenticated(Principal::new(user.username, user.roles)),
        Ok(Ok(None)) => {
            tracing::debug!(subject = %verified.subject, "token subject is not a known user");
            AuthCtx::anonymous()
        }
        Ok(Err(err)) => {
            tracing::warn!(
                error = ?err,
                subject = %verified.subject,
                "user directory lookup failed"
            );
            AuthCtx::anonymous()
        }
        Err(_) => {
            tracing::warn!(
                timeout_ms = timeout.as_millis() as u64,
                subject = %verified.subject,
                "user directory lookup timed out"
            );
            AuthCtx::anonymous()
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
