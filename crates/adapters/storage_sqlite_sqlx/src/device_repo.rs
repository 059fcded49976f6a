//! `SQLite` implementation of [`DeviceRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use sensorlog_app::ports::DeviceRepository;
use sensorlog_domain::device::{Device, NewDevice};
use sensorlog_domain::error::SensorLogError;
use sensorlog_domain::id::DeviceId;

use crate::error::StorageError;
use crate::sql::json_list;

/// Wrapper for converting database rows into domain [`Device`].
struct Wrapper(Device);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Device> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let device_type: String = row.try_get("type")?;

        Ok(Self(Device {
            id: DeviceId::new(id),
            name,
            device_type,
        }))
    }
}

const INSERT: &str = "INSERT INTO devices (name, type) VALUES (?, ?) RETURNING id, name, type";
const SELECT_BY_ID: &str = "SELECT id, name, type FROM devices WHERE id = ?";
const SELECT_ALL: &str = "SELECT id, name, type FROM devices ORDER BY id";
const SELECT_TYPES: &str = "SELECT DISTINCT type FROM devices ORDER BY type";
const SELECT_BY_TYPES: &str = r"
    SELECT id, name, type FROM devices
    WHERE type IN (SELECT value FROM json_each(?))
    ORDER BY id
";

/// `SQLite`-backed device repository.
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    async fn create(&self, device: NewDevice) -> Result<Device, SensorLogError> {
        let row: Wrapper = sqlx::query_as(INSERT)
            .bind(&device.name)
            .bind(&device.device_type)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.0)
    }

    async fn get_by_id(&self, id: DeviceId) -> Result<Option<Device>, SensorLogError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Device>, SensorLogError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn get_types(&self) -> Result<Vec<String>, SensorLogError> {
        let rows: Vec<(String,)> = sqlx::query_as(SELECT_TYPES)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|(t,)| t).collect())
    }

    async fn find_by_types(&self, types: &[String]) -> Result<Vec<Device>, SensorLogError> {
        if types.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_TYPES)
            .bind(json_list(types.iter().map(String::as_str)))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteDeviceRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteDeviceRepository::new(db.pool().clone())
    }

    fn new_device(name: &str, device_type: &str) -> NewDevice {
        Device::builder()
            .name(name)
            .device_type(device_type)
            .build()
            .unwrap()
    }

    async fn seeded() -> SqliteDeviceRepository {
        let repo = setup().await;
        repo.create(new_device("boiler", "thermometer"))
            .await
            .unwrap();
        repo.create(new_device("cellar", "hygrometer")).await.unwrap();
        repo.create(new_device("attic", "thermometer")).await.unwrap();
        repo.create(new_device("roof", "anemometer")).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn should_create_and_retrieve_device_when_valid() {
        let repo = setup().await;

        let created = repo
            .create(new_device("boiler", "thermometer"))
            .await
            .unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "boiler");
        assert_eq!(fetched.device_type, "thermometer");
    }

    #[tokio::test]
    async fn should_generate_increasing_ids() {
        let repo = setup().await;
        let first = repo.create(new_device("a", "t")).await.unwrap();
        let second = repo.create(new_device("b", "t")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn should_return_none_when_device_not_found() {
        let repo = setup().await;
        let result = repo.get_by_id(DeviceId::new(42)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_all_devices_in_id_order() {
        let repo = seeded().await;
        let all = repo.get_all().await.unwrap();
        let names: Vec<&str> = all.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["boiler", "cellar", "attic", "roof"]);
    }

    #[tokio::test]
    async fn should_list_distinct_sorted_types() {
        let repo = seeded().await;
        let types = repo.get_types().await.unwrap();
        assert_eq!(types, vec!["anemometer", "hygrometer", "thermometer"]);
    }

    #[tokio::test]
    async fn should_find_devices_matching_any_of_the_types() {
        let repo = seeded().await;
        let found = repo
            .find_by_types(&["thermometer".to_string(), "anemometer".to_string()])
            .await
            .unwrap();
        let names: Vec<&str> = found.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["boiler", "attic", "roof"]);
    }

    #[tokio::test]
    async fn should_ignore_repeated_types() {
        let repo = seeded().await;
        let types = vec!["hygrometer".to_string(); 3];
        let found = repo.find_by_types(&types).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "cellar");
    }

    #[tokio::test]
    async fn should_accept_type_lists_beyond_the_bound_variable_limit() {
        let repo = seeded().await;
        let mut types: Vec<String> = (0..40_000).map(|i| format!("kind-{i}")).collect();
        types.push("anemometer".to_string());

        let found = repo.find_by_types(&types).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "roof");
    }

    #[tokio::test]
    async fn should_find_nothing_for_empty_type_list() {
        let repo = seeded().await;
        assert!(repo.find_by_types(&[]).await.unwrap().is_empty());
    }
}
