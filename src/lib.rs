pub mod config;
pub mod course;
pub mod entry;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod logging;
pub mod manager;
pub mod persistence;
pub mod render;

pub use config::{ConfigError, DatabaseConfig, HttpConfig, TimetableConfig};
pub use course::Course;
pub use entry::{
    EntryFields, TimetableEntry, TimetableFilter, WEEKDAYS, today, weekday_name,
};
pub use manager::{TimetableError, TimetableManager, sort_by_period};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteRecordStore;
pub use persistence::{
    MemoryRecordStore, PersistenceResult, RecordStore, StoreError, export_timetable_to_csv,
    export_timetable_to_json,
};

/// Open the SQLite store described by `config`.
#[cfg(feature = "sqlite")]
pub fn open_store(config: &DatabaseConfig) -> PersistenceResult<SqliteRecordStore> {
    if config.in_memory {
        SqliteRecordStore::in_memory()
    } else {
        SqliteRecordStore::new(&config.path)
    }
}
