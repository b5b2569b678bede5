/*
 * Responsibility
 * - User Directory: username -> (password hash, roles) の参照
 * - 未登録の username は Err ではなく Ok(None) を返す
 * - 認証 middleware が毎リクエスト roles を引き直すために使う (発行には使わない)
 *
 * 前提とするテーブル (migration はこの crate の外):
 *   users ("username" TEXT UNIQUE, "passwordHash" TEXT, "roles" TEXT[])
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;
use crate::services::auth::Role;

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub username: String,
    /// directory の返却契約の一部。gate は roles しか使わず、照合は login 側の責務
    #[allow(dead_code)]
    pub password_hash: String,
    pub roles: Vec<Role>,
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, RepoError>;
}

#[derive(Debug, FromRow)]
struct UserRow {
    username: String,
    #[sqlx(rename = "passwordHash")]
    password_hash: String,
    roles: Vec<String>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        // 未知の role 文字列は付与しない (fail closed)
        let roles = row
            .roles
            .iter()
            .filter_map(|r| match r.parse::<Role>() {
                Ok(role) => Some(role),
                Err(err) => {
                    tracing::warn!(username = %row.username, error = %err, "ignoring stored role");
                    None
                }
            })
            .collect();

        Self {
            username: row.username,
            password_hash: row.password_hash,
            roles,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PgUserDirectory {
    db: PgPool,
}

impl PgUserDirectory {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT username, "passwordHash", roles
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(UserRecord::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_stored_roles_are_dropped() {
        let row = UserRow {
            username: "alice".into(),
            password_hash: "$2b$10$hash".into(),
            roles: vec!["ROLE_USER".into(), "SUPERUSER".into(), "admin".into()],
        };

        let record = UserRecord::from(row);
        assert_eq!(record.roles, vec![Role::User, Role::Admin]);
    }
}
