use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::error::{PulseError, PulseResult};

/// Reactor tuning knobs.
///
/// Defaults: a 10-slot queue, two internal events per timer tick, one timer
/// per second, an internal-event attempt every fifth tick and 200ms of pacing
/// per cycle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReactorConfig {
    /// Queue size limit. Oldest events are dropped beyond this.
    pub capacity: usize,
    /// Max internal events spendable per timer tick.
    pub budget_quota: u32,
    /// Timer-unit granularity in seconds of logical time.
    pub tick_interval_secs: u64,
    /// Ticks between internal-event attempts.
    pub internal_event_period: u64,
    /// Pause between reactor cycles.
    pub pace_interval_ms: u64,
}

impl Default for ReactorConfig {
    fn default() -> Self {
        Self {
            capacity: 10,
            budget_quota: 2,
            tick_interval_secs: 1,
            internal_event_period: 5,
            pace_interval_ms: 200,
        }
    }
}

impl ReactorConfig {
    /// Defaults with `PULSE_*` environment overrides applied.
    pub fn from_env() -> PulseResult<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `PULSE_*` environment variables. A `.env` file in
    /// the working directory is loaded first if present.
    pub fn apply_env(&mut self) -> PulseResult<()> {
        dotenvy::dotenv().ok();
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Same as [`apply_env`](Self::apply_env) with an injectable lookup.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> PulseResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        override_from(&lookup, "PULSE_CAPACITY", &mut self.capacity)?;
        override_from(&lookup, "PULSE_BUDGET_QUOTA", &mut self.budget_quota)?;
        override_from(&lookup, "PULSE_TICK_INTERVAL_SECS", &mut self.tick_interval_secs)?;
        override_from(
            &lookup,
            "PULSE_INTERNAL_EVENT_PERIOD",
            &mut self.internal_event_period,
        )?;
        override_from(&lookup, "PULSE_PACE_INTERVAL_MS", &mut self.pace_interval_ms)?;
        Ok(())
    }

    /// Reject values the reactor cannot run with.
    ///
    /// A zero budget quota is allowed: every internal-event attempt is denied.
    pub fn validate(&self) -> PulseResult<()> {
        if self.capacity == 0 {
            return Err(PulseError::InvalidConfig {
                field: "capacity",
                reason: "queue must hold at least one event".into(),
            });
        }
        if self.tick_interval_secs == 0 {
            return Err(PulseError::InvalidConfig {
                field: "tick_interval_secs",
                reason: "must be at least 1".into(),
            });
        }
        if self.internal_event_period == 0 {
            return Err(PulseError::InvalidConfig {
                field: "internal_event_period",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub fn pace_interval(&self) -> Duration {
        Duration::from_millis(self.pace_interval_ms)
    }

    pub fn log_summary(&self) {
        tracing::info!("Reactor config:");
        tracing::info!("  capacity: {}", self.capacity);
        tracing::info!("  budget_quota: {}", self.budget_quota);
        tracing::info!("  tick_interval_secs: {}", self.tick_interval_secs);
        tracing::info!("  internal_event_period: {}", self.internal_event_period);
        tracing::info!("  pace_interval_ms: {}", self.pace_interval_ms);
    }
}

fn override_from<F, T>(lookup: &F, key: &'static str, slot: &mut T) -> PulseResult<()>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(key) else {
        return Ok(());
    };
    *slot = raw
        .trim()
        .parse()
        .map_err(|_| PulseError::EnvVar { key, value: raw })?;
    Ok(())
}

/// Load and parse a TOML config file. Missing fields fall back to defaults.
pub fn load_config(path: &Path) -> PulseResult<ReactorConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: ReactorConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_runnable() {
        let config = ReactorConfig::default();
        assert_eq!(config.capacity, 10);
        assert_eq!(config.budget_quota, 2);
        assert_eq!(config.tick_interval_secs, 1);
        assert_eq!(config.internal_event_period, 5);
        assert_eq!(config.pace_interval(), Duration::from_millis(200));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "capacity = 3\nbudget_quota = 0").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.capacity, 3);
        assert_eq!(config.budget_quota, 0);
        assert_eq!(config.internal_event_period, 5);
    }

    #[test]
    fn unknown_toml_field_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "capacity = 3\npriority = \"high\"").unwrap();

        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/pulse.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/pulse.toml"));
    }

    #[test]
    fn env_overrides_replace_fields() {
        let mut config = ReactorConfig::default();
        config
            .apply_env_with(lookup_from(&[
                ("PULSE_CAPACITY", "4"),
                ("PULSE_PACE_INTERVAL_MS", " 0 "),
            ]))
            .unwrap();
        assert_eq!(config.capacity, 4);
        assert_eq!(config.pace_interval_ms, 0);
        assert_eq!(config.budget_quota, 2);
    }

    #[test]
    fn unparsable_env_value_is_an_error() {
        let mut config = ReactorConfig::default();
        let err = config
            .apply_env_with(lookup_from(&[("PULSE_BUDGET_QUOTA", "-1")]))
            .unwrap_err();
        assert!(matches!(
            err,
            PulseError::EnvVar { key: "PULSE_BUDGET_QUOTA", .. }
        ));
    }

    #[test]
    fn zero_capacity_is_invalid() {
        let config = ReactorConfig {
            capacity: 0,
            ..ReactorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PulseError::InvalidConfig { field: "capacity", .. })
        ));
    }

    #[test]
    fn zero_period_and_interval_are_invalid() {
        let config = ReactorConfig {
            internal_event_period: 0,
            ..ReactorConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ReactorConfig {
            tick_interval_secs: 0,
            ..ReactorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
