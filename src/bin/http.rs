#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use course_timetable::{
        TimetableConfig, TimetableManager, http_api, logging, open_store,
    };
    use tracing::info;

    logging::init_logging(logging::HTTP_DEFAULT_FILTER);

    // explicit TIMETABLE_CONFIG path > ./timetable.toml > defaults
    let config = TimetableConfig::from_env()?;

    if config.database.in_memory {
        info!("using in-memory database");
    } else {
        info!(path = %config.database.path.display(), "opening SQLite database");
    }
    let store = open_store(&config.database)?;
    let manager = TimetableManager::from_store(store);

    http_api::serve(config.http.bind, manager).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
