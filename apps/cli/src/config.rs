use std::time::Duration;

use wageclock_core::constants::DEFAULT_TICK_MILLIS;
use wageclock_storage_sqlite::db;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: String,
    pub tick_interval: Duration,
    pub persist: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup("WC_DATA_DIR").unwrap_or_else(|| "./data".into());
        let explicit_db_path = lookup("WC_DB_PATH").filter(|p| !p.trim().is_empty());
        let db_path = db::get_db_path(&data_dir, explicit_db_path.as_deref());

        let tick_millis = lookup("WC_TICK_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_TICK_MILLIS);

        let persist = lookup("WC_PERSIST")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);

        Self {
            db_path,
            tick_interval: Duration::from_millis(tick_millis),
            persist,
        }
    }
}
