//! `SQLite` implementation of [`HistoryRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use sensorlog_app::ports::HistoryRepository;
use sensorlog_domain::error::SensorLogError;
use sensorlog_domain::history::{HistoryFilter, HistoryRecord, NewReading, RecentReading};
use sensorlog_domain::id::{DeviceId, HistoryId};

use crate::error::StorageError;
use crate::sql::{decode_timestamp, encode_timestamp, json_list};

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(HistoryRecord);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let device_id: Option<i64> = row.try_get("device_id")?;
        let recorded_at: String = row.try_get("recorded_at")?;
        let value: f64 = row.try_get("value")?;

        Ok(Self(HistoryRecord {
            id: HistoryId::new(id),
            device_id: device_id.map(DeviceId::new),
            timestamp: decode_timestamp(&recorded_at)?,
            value,
        }))
    }
}

struct RecentWrapper(RecentReading);

impl<'r> FromRow<'r, SqliteRow> for RecentWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let recorded_at: String = row.try_get("recorded_at")?;
        let value: f64 = row.try_get("value")?;
        let device_name: String = row.try_get("device_name")?;

        Ok(Self(RecentReading {
            date_time: decode_timestamp(&recorded_at)?,
            value,
            device_name,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO history (device_id, recorded_at, value)
    VALUES (?, ?, ?)
    RETURNING id, device_id, recorded_at, value
";

const SELECT_RECENT: &str = r"
    SELECT h.recorded_at, h.value, d.name AS device_name
    FROM history h
    INNER JOIN devices d ON h.device_id = d.id
    ORDER BY h.recorded_at DESC, h.id DESC
    LIMIT ?
";

/// Build the filtered select. Parameters are bound by the caller in the
/// order: device id list (one JSON array), start, end.
fn select_filtered(filter: &HistoryFilter) -> String {
    let mut conditions = Vec::new();
    if !filter.device_ids.is_empty() {
        conditions.push("device_id IN (SELECT value FROM json_each(?))");
    }
    if filter.start.is_some() {
        conditions.push("recorded_at >= ?");
    }
    if filter.end.is_some() {
        conditions.push("recorded_at <= ?");
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    format!(
        "SELECT id, device_id, recorded_at, value FROM history {where_clause} ORDER BY recorded_at DESC, id DESC"
    )
}

/// `SQLite`-backed history log.
pub struct SqliteHistoryRepository {
    pool: SqlitePool,
}

impl SqliteHistoryRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl HistoryRepository for SqliteHistoryRepository {
    async fn record(&self, reading: NewReading) -> Result<HistoryRecord, SensorLogError> {
        let row: Wrapper = sqlx::query_as(INSERT)
            .bind(reading.device_id.get())
            .bind(encode_timestamp(reading.timestamp))
            .bind(reading.value)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.0)
    }

    async fn find(&self, filter: &HistoryFilter) -> Result<Vec<HistoryRecord>, SensorLogError> {
        let sql = select_filtered(filter);
        let mut query = sqlx::query_as::<_, Wrapper>(&sql);
        if !filter.device_ids.is_empty() {
            query = query.bind(json_list(filter.device_ids.iter().map(|id| id.get())));
        }
        if let Some(start) = filter.start {
            query = query.bind(encode_timestamp(start));
        }
        if let Some(end) = filter.end {
            query = query.bind(encode_timestamp(end));
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn get_recent(&self, limit: usize) -> Result<Vec<RecentReading>, SensorLogError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<RecentWrapper> = sqlx::query_as(SELECT_RECENT)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device_repo::SqliteDeviceRepository;
    use crate::pool::Config;
    use chrono::{Duration, TimeZone, Utc};
    use sensorlog_app::ports::DeviceRepository;
    use sensorlog_domain::device::Device;
    use sensorlog_domain::time::Timestamp;

    struct Fixture {
        repo: SqliteHistoryRepository,
        pool: SqlitePool,
        devices: Vec<DeviceId>,
    }

    async fn setup() -> Fixture {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        let pool = db.pool().clone();

        let device_repo = SqliteDeviceRepository::new(pool.clone());
        let mut devices = Vec::new();
        for (name, device_type) in [("boiler", "t"), ("cellar", "h"), ("attic", "t")] {
            let device = Device::builder()
                .name(name)
                .device_type(device_type)
                .build()
                .unwrap();
            devices.push(device_repo.create(device).await.unwrap().id);
        }

        Fixture {
            repo: SqliteHistoryRepository::new(pool.clone()),
            pool,
            devices,
        }
    }

    fn jan(day: u32, hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    async fn record(repo: &SqliteHistoryRepository, device: DeviceId, ts: Timestamp, value: f64) {
        let reading = NewReading::builder(device, value).timestamp(ts).build();
        repo.record(reading).await.unwrap();
    }

    #[tokio::test]
    async fn should_record_and_return_generated_id() {
        let fx = setup().await;
        let reading = NewReading::builder(fx.devices[0], 21.5)
            .timestamp(jan(3, 10))
            .build();

        let recorded = fx.repo.record(reading).await.unwrap();

        assert!(recorded.id.get() > 0);
        assert_eq!(recorded.device_id, Some(fx.devices[0]));
        assert_eq!(recorded.timestamp, jan(3, 10));
        assert!((recorded.value - 21.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn should_return_all_records_newest_first_when_unfiltered() {
        let fx = setup().await;
        record(&fx.repo, fx.devices[0], jan(2, 0), 1.0).await;
        record(&fx.repo, fx.devices[1], jan(9, 0), 2.0).await;
        record(&fx.repo, fx.devices[2], jan(5, 0), 3.0).await;

        let found = fx.repo.find(&HistoryFilter::default()).await.unwrap();

        let times: Vec<Timestamp> = found.iter().map(|r| r.timestamp).collect();
        assert_eq!(times, vec![jan(9, 0), jan(5, 0), jan(2, 0)]);
    }

    #[tokio::test]
    async fn should_filter_by_devices_and_inclusive_date_range() {
        let fx = setup().await;
        let (a, b, c) = (fx.devices[0], fx.devices[1], fx.devices[2]);
        record(&fx.repo, a, jan(1, 0), 1.0).await; // on the lower bound
        record(&fx.repo, b, jan(15, 12), 2.0).await;
        record(&fx.repo, a, jan(31, 0), 3.0).await; // on the upper bound
        record(&fx.repo, c, jan(10, 0), 4.0).await; // other device
        record(&fx.repo, a, jan(31, 1), 5.0).await; // past the end
        record(
            &fx.repo,
            b,
            Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap(),
            6.0,
        )
        .await; // before the start

        let filter = HistoryFilter {
            device_ids: vec![a, b],
            start: Some(jan(1, 0)),
            end: Some(jan(31, 0)),
        };
        let found = fx.repo.find(&filter).await.unwrap();

        let values: Vec<f64> = found.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![3.0, 2.0, 1.0]);
        assert!(found.iter().all(|r| filter.matches(r)));
    }

    #[tokio::test]
    async fn should_accept_device_lists_beyond_the_bound_variable_limit() {
        let fx = setup().await;
        record(&fx.repo, fx.devices[0], jan(1, 0), 1.0).await;
        record(&fx.repo, fx.devices[2], jan(2, 0), 2.0).await;

        let mut device_ids: Vec<DeviceId> = (1_000..41_000).map(DeviceId::new).collect();
        device_ids.push(fx.devices[2]);
        device_ids.push(fx.devices[2]);
        let filter = HistoryFilter {
            device_ids,
            start: Some(jan(1, 0)),
            end: None,
        };

        let found = fx.repo.find(&filter).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].device_id, Some(fx.devices[2]));
    }

    #[tokio::test]
    async fn should_apply_start_bound_alone() {
        let fx = setup().await;
        record(&fx.repo, fx.devices[0], jan(1, 0), 1.0).await;
        record(&fx.repo, fx.devices[0], jan(20, 0), 2.0).await;

        let filter = HistoryFilter {
            start: Some(jan(10, 0)),
            ..HistoryFilter::default()
        };
        let found = fx.repo.find(&filter).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].timestamp, jan(20, 0));
    }

    #[tokio::test]
    async fn should_order_sub_second_timestamps_correctly() {
        let fx = setup().await;
        let base = jan(5, 0);
        record(&fx.repo, fx.devices[0], base + Duration::milliseconds(500), 2.0).await;
        record(&fx.repo, fx.devices[0], base, 1.0).await;
        record(&fx.repo, fx.devices[0], base + Duration::seconds(1), 3.0).await;

        let found = fx.repo.find(&HistoryFilter::default()).await.unwrap();
        let values: Vec<f64> = found.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![3.0, 2.0, 1.0]);
    }

    #[tokio::test]
    async fn should_join_device_names_in_recent_history() {
        let fx = setup().await;
        record(&fx.repo, fx.devices[0], jan(1, 0), 1.0).await;
        record(&fx.repo, fx.devices[1], jan(2, 0), 2.0).await;

        let recent = fx.repo.get_recent(100).await.unwrap();

        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].device_name, "cellar");
        assert_eq!(recent[0].date_time, jan(2, 0));
        assert_eq!(recent[1].device_name, "boiler");
    }

    #[tokio::test]
    async fn should_exclude_unattributed_records_from_recent_history() {
        let fx = setup().await;
        record(&fx.repo, fx.devices[0], jan(1, 0), 1.0).await;
        sqlx::query("INSERT INTO history (device_id, recorded_at, value) VALUES (NULL, ?, ?)")
            .bind(encode_timestamp(jan(2, 0)))
            .bind(9.0)
            .execute(&fx.pool)
            .await
            .unwrap();

        let recent = fx.repo.get_recent(100).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].device_name, "boiler");

        // still visible through the unfiltered query
        let all = fx.repo.find(&HistoryFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].device_id, None);
    }

    #[tokio::test]
    async fn should_respect_recent_limit() {
        let fx = setup().await;
        for hour in 0..10 {
            record(&fx.repo, fx.devices[0], jan(1, hour), f64::from(hour)).await;
        }

        let recent = fx.repo.get_recent(3).await.unwrap();
        let values: Vec<f64> = recent.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![9.0, 8.0, 7.0]);
    }
}
