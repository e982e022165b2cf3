//! Environment-driven configuration
//!
//! All settings come from environment variables (a `.env` file is loaded by the
//! binary first). `from_lookup` takes any key → value function so tests never
//! touch the process environment.

use std::env;
use std::net::SocketAddr;

use chrono::Weekday;

use crate::coach::{AthleteStats, OpenAiConfig};
use crate::error::{TrackerError, TrackerResult};
use crate::export::ClockStyle;
use crate::types::DEFAULT_DAILY_GOAL;
use crate::utils::time::{Calendar, Zone};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `pullup_tracker=debug,tower_http=info`
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Coaching collaborator settings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoachConfig {
    /// `None` disables the coach routes
    pub openai: Option<OpenAiConfig>,
    /// Free-text athlete description added to analysis prompts
    pub athlete_profile: Option<String>,
    /// Structured stats for nutrition advice
    pub athlete: AthleteStats,
}

/// Full tracker configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    pub host: String,
    pub port: u16,
    pub calendar: Calendar,
    pub clock_style: ClockStyle,
    pub daily_goal: u32,
    pub coach: CoachConfig,
    pub logging: LoggingConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            calendar: Calendar::utc(),
            clock_style: ClockStyle::default(),
            daily_goal: DEFAULT_DAILY_GOAL,
            coach: CoachConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TrackerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> TrackerResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset and blank values use defaults
    pub fn from_lookup<F>(lookup: F) -> TrackerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| TrackerError::config(format!("PORT must be a port number, got '{}'", raw)))?,
            None => DEFAULT_PORT,
        };

        let zone = match get("PULLUP_TIMEZONE").or_else(|| get("PULLUP_UTC_OFFSET")) {
            Some(raw) => raw
                .parse::<Zone>()
                .map_err(|e| TrackerError::config(format!("PULLUP_TIMEZONE: {}", e)))?,
            None => Zone::Local,
        };

        let week_start = match get("PULLUP_WEEK_START") {
            Some(raw) => raw.parse::<Weekday>().map_err(|_| {
                TrackerError::config(format!("PULLUP_WEEK_START must be a weekday, got '{}'", raw))
            })?,
            None => Weekday::Sun,
        };

        let clock_style = match get("PULLUP_CLOCK") {
            Some(raw) => raw.parse::<ClockStyle>().map_err(TrackerError::config)?,
            None => ClockStyle::default(),
        };

        let daily_goal = match get("PULLUP_DAILY_GOAL") {
            Some(raw) => raw.parse::<u32>().map_err(|_| {
                TrackerError::config(format!("PULLUP_DAILY_GOAL must be a whole number, got '{}'", raw))
            })?,
            None => DEFAULT_DAILY_GOAL,
        };

        let openai = get("OPENAI_API_KEY").or_else(|| get("OPENAI_KEY")).map(|key| {
            let mut config = OpenAiConfig::new(key);
            if let Some(base_url) = get("OPENAI_BASE_URL") {
                config.base_url = base_url;
            }
            if let Some(model) = get("OPENAI_MODEL") {
                config.model = model;
            }
            config
        });

        let number = |key: &str| -> TrackerResult<Option<f64>> {
            get(key)
                .map(|raw| {
                    raw.parse::<f64>()
                        .ok()
                        .filter(|n| n.is_finite() && *n > 0.0)
                        .ok_or_else(|| TrackerError::config(format!("{} must be a positive number, got '{}'", key, raw)))
                })
                .transpose()
        };
        let athlete = AthleteStats {
            age: number("COACH_ATHLETE_AGE")?.map(|age| age.round() as u32),
            height: get("COACH_ATHLETE_HEIGHT"),
            current_weight: number("COACH_ATHLETE_WEIGHT")?,
            goal_weight: number("COACH_ATHLETE_GOAL_WEIGHT")?,
            activity_level: get("COACH_ATHLETE_ACTIVITY"),
            goal: get("COACH_ATHLETE_GOAL"),
        };

        let format = match get("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            Some("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            host: get("PULLUP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            calendar: Calendar::new(zone, week_start),
            clock_style,
            daily_goal,
            coach: CoachConfig {
                openai,
                athlete_profile: get("COACH_ATHLETE_PROFILE"),
                athlete,
            },
            logging: LoggingConfig {
                filter: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
                format,
            },
        })
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> TrackerResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| TrackerError::config(format!("invalid bind address {}:{}", self.host, self.port)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> TrackerResult<TrackerConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TrackerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("PULLUP_UTC_OFFSET", "UTC")]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.calendar, Calendar::utc());
        assert_eq!(config.clock_style, ClockStyle::TwelveHour);
        assert_eq!(config.daily_goal, 15);
        assert_eq!(config.coach.openai, None);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PULLUP_HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("PULLUP_UTC_OFFSET", "+09:00"),
            ("PULLUP_WEEK_START", "monday"),
            ("PULLUP_CLOCK", "24h"),
            ("PULLUP_DAILY_GOAL", "30"),
            ("LOG_FORMAT", "json"),
            ("RUST_LOG", "debug"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(
            config.calendar.zone(),
            Zone::Fixed(chrono::FixedOffset::east_opt(9 * 3600).unwrap())
        );
        assert_eq!(config.calendar.week_start(), Weekday::Mon);
        assert_eq!(config.clock_style, ClockStyle::TwentyFourHour);
        assert_eq!(config.daily_goal, 30);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn test_zone_defaults_to_host_local() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.calendar.zone(), Zone::Local);
    }

    #[test]
    fn test_named_zone() {
        let config = config_from(&[("PULLUP_TIMEZONE", "America/New_York"), ("PULLUP_UTC_OFFSET", "+02:00")]).unwrap();
        assert_eq!(config.calendar.zone(), Zone::Named(chrono_tz::America::New_York));
    }

    #[test]
    fn test_coach_settings() {
        let config = config_from(&[
            ("OPENAI_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4o-mini"),
            ("COACH_ATHLETE_PROFILE", "Age: 40"),
        ])
        .unwrap();

        let openai = config.coach.openai.unwrap();
        assert_eq!(openai.api_key, "sk-test");
        assert_eq!(openai.model, "gpt-4o-mini");
        assert_eq!(openai.base_url, "https://api.openai.com/v1");
        assert_eq!(config.coach.athlete_profile.as_deref(), Some("Age: 40"));
    }

    #[test]
    fn test_athlete_stats() {
        let config = config_from(&[
            ("COACH_ATHLETE_AGE", "62"),
            ("COACH_ATHLETE_HEIGHT", "5'10\""),
            ("COACH_ATHLETE_WEIGHT", "172"),
            ("COACH_ATHLETE_GOAL_WEIGHT", "152.5"),
            ("COACH_ATHLETE_GOAL", "lose 20 lbs"),
        ])
        .unwrap();

        let athlete = config.coach.athlete;
        assert_eq!(athlete.age, Some(62));
        assert_eq!(athlete.height.as_deref(), Some("5'10\""));
        assert_eq!(athlete.current_weight, Some(172.0));
        assert_eq!(athlete.goal_weight, Some(152.5));
        assert_eq!(athlete.activity_level, None);
        assert!(config_from(&[]).unwrap().coach.athlete.is_empty());
    }

    #[test]
    fn test_primary_key_wins() {
        let config = config_from(&[("OPENAI_API_KEY", "primary"), ("OPENAI_KEY", "fallback")]).unwrap();
        assert_eq!(config.coach.openai.unwrap().api_key, "primary");
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = config_from(&[("PORT", "  "), ("OPENAI_API_KEY", "")]).unwrap();
        assert_eq!(config.port, 5000);
        assert!(config.coach.openai.is_none());
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        for (key, value) in [
            ("PORT", "http"),
            ("PULLUP_TIMEZONE", "Europe/Atlantis"),
            ("PULLUP_WEEK_START", "someday"),
            ("PULLUP_CLOCK", "36h"),
            ("PULLUP_DAILY_GOAL", "-1"),
            ("COACH_ATHLETE_WEIGHT", "heavy"),
            ("COACH_ATHLETE_AGE", "0"),
        ] {
            let result = config_from(&[(key, value)]);
            assert!(
                matches!(result, Err(TrackerError::Config(_))),
                "{}={} should be rejected",
                key,
                value
            );
        }
    }
}
