/*
 * Responsibility
 * - handler / middleware から使う業務外のサービス (認証まわり)
 */
pub mod auth;
