use std::path::{Path, PathBuf};
use std::{env, fs};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use course_model::clock::{Clock, FixedClock, SystemClock};
use course_tracker::seed::Bootstrap;
use course_tracker::store::CourseStore;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, registry, EnvFilter};

pub const NOW_VAR: &str = "TRACKER_NOW";
pub const SEED_VAR: &str = "TRACKER_SEED";

/// Settings read from the environment, after loading a `.env` file if there is one.
#[derive(Debug, Clone, Default)]
pub struct TrackerConfig {
    now: Option<DateTime<Utc>>,
    seed_path: Option<PathBuf>,
}

impl TrackerConfig {
    pub fn from_env() -> Result<Self> {
        tolerate_missing(dotenvy::dotenv())?;

        let now = env::var(NOW_VAR)
            .ok()
            .map(|value| parse_now(&value))
            .transpose()?;
        let seed_path = env::var_os(SEED_VAR).map(PathBuf::from);

        let config = Self { now, seed_path };
        debug!(?config, "read configuration");
        Ok(config)
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn with_seed_path(mut self, seed_path: PathBuf) -> Self {
        self.seed_path = Some(seed_path);
        self
    }

    pub fn now(&self) -> Option<DateTime<Utc>> {
        self.now
    }

    pub fn seed_path(&self) -> Option<&Path> {
        self.seed_path.as_deref()
    }

    pub fn clock(&self) -> EnvClock {
        match self.now {
            Some(now) => EnvClock::Fixed(FixedClock::new(now)),
            None => EnvClock::System(SystemClock),
        }
    }

    pub fn bootstrap(&self) -> Result<Bootstrap> {
        match &self.seed_path {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("could not read seed file {}", path.display()))?;
                Bootstrap::from_json(&json)
                    .with_context(|| format!("could not load seed file {}", path.display()))
            }
            None => Bootstrap::bundled(),
        }
    }
}

/// A missing .env file is fine; one that cannot be read or parsed is not.
fn tolerate_missing<T>(loaded: dotenvy::Result<T>) -> Result<()> {
    match loaded {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => {
            debug!("no .env file");
            Ok(())
        }
        Err(err) => Err(err).context("could not load .env file"),
    }
}

pub fn parse_now(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|now| now.with_timezone(&Utc))
        .with_context(|| format!("`{value}` is not an RFC 3339 timestamp"))
}

pub fn init_store(config: &TrackerConfig) -> Result<CourseStore<EnvClock>> {
    let bootstrap = config.bootstrap()?;
    Ok(CourseStore::from_bootstrap(config.clock(), bootstrap))
}

/// The wall clock, unless the configuration pins "now".
#[derive(Debug, Clone, Copy)]
pub enum EnvClock {
    System(SystemClock),
    Fixed(FixedClock),
}

impl Clock for EnvClock {
    fn now(&self) -> DateTime<Utc> {
        match self {
            Self::System(clock) => clock.now(),
            Self::Fixed(clock) => clock.now(),
        }
    }
}

pub fn init_tracing() {
    registry()
        .with(fmt::layer().event_format(format().pretty()))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offsets_into_utc() {
        let now = parse_now("2026-02-09T09:30:00-05:00").unwrap();
        assert_eq!(now.to_rfc3339(), "2026-02-09T14:30:00+00:00");
        assert!(parse_now("next tuesday").is_err());
    }

    #[test]
    fn pinned_now_gives_a_fixed_clock() {
        let now = parse_now("2026-02-09T00:00:00Z").unwrap();
        let config = TrackerConfig::default().with_now(now);
        assert!(matches!(config.clock(), EnvClock::Fixed(_)));
        assert_eq!(config.clock().now(), now);
        assert!(matches!(TrackerConfig::default().clock(), EnvClock::System(_)));
    }

    #[test]
    fn only_a_missing_env_file_is_tolerated() {
        assert!(tolerate_missing(dotenvy::from_path("/nonexistent/.env")).is_ok());

        let path = env::temp_dir().join(format!("tracker-{}.env", std::process::id()));
        fs::write(&path, "TRACKER NOW\n").unwrap();
        let err = tolerate_missing(dotenvy::from_path(&path)).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(err.to_string().contains("could not load .env file"));
    }

    #[test]
    fn missing_seed_file_is_an_error() {
        let config =
            TrackerConfig::default().with_seed_path(PathBuf::from("/nonexistent/seed.json"));
        let err = init_store(&config).unwrap_err();
        assert!(err.to_string().contains("could not read seed file"));
    }

    #[test]
    fn default_config_uses_the_bundled_seed() {
        let store = init_store(&TrackerConfig::default()).unwrap();
        assert_eq!(store.courses().len(), 3);
    }
}
