use duration_str::deserialize_duration;
use guardvec_allocator::{AllocationEvent, DiagnosticSink, Encoder, Log, Stderr, Stdout};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Driver config, the binary always runs with the defaults.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DriverConfig {
    /// Number of worker threads, identified as `1..=workers`.
    #[serde(default = "get_default_workers")]
    pub workers: u32,
    /// Number of values each worker appends.
    #[serde(default = "get_default_appends_per_worker")]
    pub appends_per_worker: u32,
    /// Pause taken by a worker between two appends.
    #[serde(deserialize_with = "deserialize_duration")]
    #[serde(default = "get_default_pacing")]
    pub pacing: Duration,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            workers: get_default_workers(),
            appends_per_worker: get_default_appends_per_worker(),
            pacing: get_default_pacing(),
            diagnostics: DiagnosticsConfig::default(),
        }
    }
}

impl DriverConfig {
    pub fn from_file(path: impl AsRef<Path>) -> std::io::Result<DriverConfig> {
        serde_yaml::from_reader(std::fs::File::open(path)?).map_err(std::io::Error::other)
    }

    pub fn with_pacing(self, pacing: Duration) -> DriverConfig {
        DriverConfig { pacing, ..self }
    }
}

impl FromStr for DriverConfig {
    type Err = std::io::Error;

    fn from_str(config: &str) -> Result<Self, Self::Err> {
        serde_yaml::from_str(config).map_err(std::io::Error::other)
    }
}

const fn get_default_workers() -> u32 {
    5
}

const fn get_default_appends_per_worker() -> u32 {
    3
}

const fn get_default_pacing() -> Duration {
    Duration::from_millis(10)
}

/// Where allocation diagnostics go and how they are rendered.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default)]
pub struct DiagnosticsConfig {
    #[serde(default)]
    pub target: Target,
    #[serde(default)]
    pub encoder: Encoder,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    #[default]
    Stdout,
    Stderr,
    Log,
}

/// Sink selected by [`DiagnosticsConfig`].
#[derive(Debug, Clone, Copy)]
pub enum Sink {
    Stdout(Stdout),
    Stderr(Stderr),
    Log(Log),
}

impl From<DiagnosticsConfig> for Sink {
    fn from(config: DiagnosticsConfig) -> Self {
        match config.target {
            Target::Stdout => Sink::Stdout(Stdout::new(config.encoder)),
            Target::Stderr => Sink::Stderr(Stderr::new(config.encoder)),
            Target::Log => Sink::Log(Log),
        }
    }
}

impl DiagnosticSink for Sink {
    fn emit(&self, event: &AllocationEvent) {
        match self {
            Sink::Stdout(sink) => sink.emit(event),
            Sink::Stderr(sink) => sink.emit(event),
            Sink::Log(sink) => sink.emit(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_five_workers_three_appends() {
        let config = DriverConfig::default();
        assert_eq!(5, config.workers);
        assert_eq!(3, config.appends_per_worker);
        assert_eq!(Duration::from_millis(10), config.pacing);
        assert_eq!(Target::Stdout, config.diagnostics.target);
        assert_eq!(Encoder::Text, config.diagnostics.encoder);
    }

    #[test]
    fn should_parse_full_config() {
        let config: DriverConfig = concat!(
            "workers: 8\n",
            "appends_per_worker: 100\n",
            "pacing: 2ms\n",
            "diagnostics:\n",
            "  target: stderr\n",
            "  encoder: json\n",
        )
        .parse()
        .unwrap();

        assert_eq!(8, config.workers);
        assert_eq!(100, config.appends_per_worker);
        assert_eq!(Duration::from_millis(2), config.pacing);
        assert_eq!(Target::Stderr, config.diagnostics.target);
        assert_eq!(Encoder::Json, config.diagnostics.encoder);
        assert!(matches!(Sink::from(config.diagnostics), Sink::Stderr(_)));
    }

    #[test]
    fn should_fill_in_missing_fields() {
        let config: DriverConfig = "workers: 2".parse().unwrap();
        assert_eq!(2, config.workers);
        assert_eq!(3, config.appends_per_worker);
        assert_eq!(Duration::from_millis(10), config.pacing);
        assert!(matches!(Sink::from(config.diagnostics), Sink::Stdout(_)));
    }

    #[test]
    fn should_reject_unknown_target() {
        assert!("diagnostics: { target: syslog }".parse::<DriverConfig>().is_err());
    }
}
