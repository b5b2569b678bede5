/*
 * Responsibility
 * - 永続化層 (users / offers) の公開
 * - handler / middleware は trait (UserDirectory / OfferRepository) 越しに触る
 */
pub mod error;
pub mod offer_repo;
pub mod user_repo;

#[cfg(test)]
pub mod memory;

pub use offer_repo::{OfferRepository, PgOfferRepository};
pub use user_repo::{PgUserDirectory, UserDirectory};
