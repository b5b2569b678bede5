/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - 認証コンテキスト（AuthCtx）の型と、handler 向けの extractor を提供する
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 */

mod core;
mod types;

pub use core::AuthCtxExtractor;
pub use types::AuthCtx;
