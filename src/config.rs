//! Runtime configuration from environment variables.
//!
//! Every knob has a working default so the simulator runs with no setup;
//! a `.env` file or exported variables override them.

use bevy::prelude::*;

/// Defense mini-game tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefenseConfig {
    /// Countdown duration for an armed session, in seconds.
    pub countdown_secs: f64,
    /// Minimum crater reduction fraction counted as a successful deflection.
    pub success_threshold: f64,
}

impl Default for DefenseConfig {
    fn default() -> Self {
        Self {
            countdown_secs: 10.0,
            success_threshold: 0.20,
        }
    }
}

/// Application settings resource.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct Settings {
    /// Base URL of the remote simulation backend.
    pub backend_url: String,
    /// Per-request timeout for backend calls, in seconds.
    pub request_timeout_secs: u64,
    /// Defense mini-game configuration.
    pub defense: DefenseConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 8,
            defense: DefenseConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from the environment (and a `.env` file if present).
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let defaults = Settings::default();
        let defense_defaults = defaults.defense;

        Self {
            backend_url: std::env::var("IMPACTSIM_BACKEND_URL")
                .unwrap_or(defaults.backend_url),
            request_timeout_secs: parse_or(
                std::env::var("IMPACTSIM_REQUEST_TIMEOUT_SECS").ok(),
                defaults.request_timeout_secs,
            ),
            defense: DefenseConfig {
                countdown_secs: parse_or(
                    std::env::var("IMPACTSIM_DEFENSE_COUNTDOWN_SECS").ok(),
                    defense_defaults.countdown_secs,
                ),
                success_threshold: parse_or(
                    std::env::var("IMPACTSIM_DEFENSE_THRESHOLD").ok(),
                    defense_defaults.success_threshold,
                ),
            },
        }
    }
}

/// Parse an optional string value, falling back to a default on absence
/// or garbage rather than failing startup.
fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let settings = Settings::default();
        assert!(settings.backend_url.starts_with("http"));
        assert!(settings.defense.countdown_secs > 0.0);
        assert!(settings.defense.success_threshold > 0.0);
        assert!(settings.defense.success_threshold < 1.0);
    }

    #[test]
    fn test_parse_or_accepts_valid() {
        assert_eq!(parse_or(Some("15".to_string()), 8u64), 15);
        assert_eq!(parse_or(Some(" 0.35 ".to_string()), 0.2f64), 0.35);
    }

    #[test]
    fn test_parse_or_falls_back_on_garbage() {
        assert_eq!(parse_or(Some("not-a-number".to_string()), 8u64), 8);
        assert_eq!(parse_or(None, 0.2f64), 0.2);
        assert_eq!(parse_or(Some(String::new()), 10.0f64), 10.0);
    }
}
