//! `SQLite` implementation of [`RoleRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use sensorlog_app::ports::RoleRepository;
use sensorlog_domain::error::{CredentialError, SensorLogError};
use sensorlog_domain::id::RoleId;
use sensorlog_domain::role::{NewRole, Role};

use crate::error::StorageError;

struct Wrapper(Role);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let role_name: String = row.try_get("role_name")?;
        let password_hash: String = row.try_get("password_hash")?;

        Ok(Self(Role {
            id: RoleId::new(id),
            role_name,
            password_hash,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO roles (role_name, password_hash)
    VALUES (?, ?)
    RETURNING id, role_name, password_hash
";

const SELECT_BY_NAME: &str =
    "SELECT id, role_name, password_hash FROM roles WHERE role_name = ?";

/// `SQLite`-backed credential store.
///
/// Name uniqueness is enforced by the `UNIQUE` constraint on `role_name`, so
/// concurrent inserts of the same name cannot both succeed.
pub struct SqliteRoleRepository {
    pool: SqlitePool,
}

impl SqliteRoleRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RoleRepository for SqliteRoleRepository {
    async fn create(&self, role: NewRole) -> Result<Role, SensorLogError> {
        let result: Result<Wrapper, sqlx::Error> = sqlx::query_as(INSERT)
            .bind(&role.role_name)
            .bind(&role.password_hash)
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(row) => Ok(row.0),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(CredentialError::DuplicateRole {
                    role_name: role.role_name,
                }
                .into())
            }
            Err(err) => Err(StorageError::from(err).into()),
        }
    }

    async fn find_by_name(&self, role_name: &str) -> Result<Option<Role>, SensorLogError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_NAME)
            .bind(role_name)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteRoleRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteRoleRepository::new(db.pool().clone())
    }

    fn new_role(name: &str, hash: &str) -> NewRole {
        NewRole {
            role_name: name.to_string(),
            password_hash: hash.to_string(),
        }
    }

    #[tokio::test]
    async fn should_create_and_find_role_by_name() {
        let repo = setup().await;

        let created = repo.create(new_role("admin", "$argon2id$x")).await.unwrap();
        let found = repo.find_by_name("admin").await.unwrap().unwrap();

        assert_eq!(found, created);
        assert_eq!(found.password_hash, "$argon2id$x");
    }

    #[tokio::test]
    async fn should_return_none_when_role_is_unknown() {
        let repo = setup().await;
        assert!(repo.find_by_name("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_match_role_name_exactly() {
        let repo = setup().await;
        repo.create(new_role("admin", "h")).await.unwrap();
        assert!(repo.find_by_name("Admin").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_reject_duplicate_role_name() {
        let repo = setup().await;
        repo.create(new_role("admin", "first")).await.unwrap();

        let result = repo.create(new_role("admin", "second")).await;

        assert!(matches!(
            result,
            Err(SensorLogError::Credential(CredentialError::DuplicateRole { ref role_name }))
                if role_name == "admin"
        ));
        let stored = repo.find_by_name("admin").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "first");
    }

    #[tokio::test]
    async fn should_let_only_one_concurrent_create_succeed() {
        let repo = setup().await;

        let (left, right) = tokio::join!(
            repo.create(new_role("operator", "left")),
            repo.create(new_role("operator", "right")),
        );

        let outcomes = [left, right];
        let successes = outcomes.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        assert!(outcomes.iter().any(|r| matches!(
            r,
            Err(SensorLogError::Credential(CredentialError::DuplicateRole { .. }))
        )));
    }
}
