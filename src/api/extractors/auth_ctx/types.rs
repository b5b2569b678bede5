/*
 * Responsibility
 * - 1 リクエスト分の「認証コンテキスト」の型
 * - Request Gate (middleware) が必ず 1 つ request extensions に格納する
 *   - 検証成功 + directory で解決できた場合のみ Principal を持つ
 *   - それ以外 (ヘッダなし / 不正トークン / 未登録 / lookup 失敗) は anonymous
 * - Access Decision は読むだけで書き換えない
 */
use crate::services::auth::Principal;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthCtx {
    principal: Option<Principal>,
}

impl AuthCtx {
    pub fn anonymous() -> Self {
        Self { principal: None }
    }

    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }
}
