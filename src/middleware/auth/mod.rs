/*
 * Responsibility
 * - access: Request Gate (token 検証 → AuthCtx 確立 → Access Decision)
 * - failure: 401 / 403 の終端レスポンス
 */
pub mod access;
pub mod failure;
