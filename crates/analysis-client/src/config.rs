//! Overlay configuration from environment variables

use std::env;
use std::str::FromStr;
use std::time::Duration;

use board_overlay::{ArrowStyle, PlacementTiming};
use chess_core::ReplayMode;

use crate::error::ConfigError;

pub const DEFAULT_ANALYSIS_URL: &str = "http://localhost:5001/analyze";
pub const DEFAULT_HEALTH_URL: &str = "http://localhost:5000/analyze";

#[derive(Clone, Debug)]
pub struct OverlayConfig {
    /// Endpoint receiving `{fen, player_color}` analysis requests
    pub analysis_url: String,

    /// Endpoint used by the connectivity probe
    pub health_url: String,

    /// Per-request HTTP timeout
    pub request_timeout: Duration,

    /// Delay between board lookups while waiting for the page
    pub board_poll_interval: Duration,

    /// Settle delay and undersized-board retry policy for arrow placement
    pub placement: PlacementTiming,

    pub arrow_style: ArrowStyle,

    pub replay_mode: ReplayMode,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            analysis_url: DEFAULT_ANALYSIS_URL.to_string(),
            health_url: DEFAULT_HEALTH_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            board_poll_interval: Duration::from_millis(1000),
            placement: PlacementTiming::default(),
            arrow_style: ArrowStyle::default(),
            replay_mode: ReplayMode::Sloppy,
        }
    }
}

impl OverlayConfig {
    /// Load configuration from environment variables.
    /// Unset variables fall back to defaults; set-but-invalid ones are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let analysis_url = url_var(&lookup, "ANALYSIS_URL", defaults.analysis_url)?;
        let health_url = url_var(&lookup, "HEALTH_URL", defaults.health_url)?;

        let request_timeout =
            Duration::from_secs(parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 10u64)?);
        let board_poll_interval =
            Duration::from_millis(parse_var(&lookup, "BOARD_POLL_INTERVAL_MS", 1000u64)?);

        let placement = PlacementTiming {
            settle_delay: Duration::from_millis(parse_var(&lookup, "SETTLE_DELAY_MS", 100u64)?),
            not_ready_retry: Duration::from_millis(parse_var(&lookup, "NOT_READY_RETRY_MS", 500u64)?),
            max_not_ready_retries: match lookup("MAX_NOT_READY_RETRIES") {
                Some(v) => Some(v.trim().parse().map_err(|_| ConfigError::Invalid {
                    name: "MAX_NOT_READY_RETRIES",
                    value: v.clone(),
                })?),
                None => None,
            },
        };

        let arrow_style = ArrowStyle::new(
            lookup("ARROW_COLOR").unwrap_or(defaults.arrow_style.color),
            parse_var(&lookup, "ARROW_WIDTH", defaults.arrow_style.width)?,
        );

        let replay_mode = match lookup("REPLAY_MODE").as_deref().map(str::trim) {
            None | Some("sloppy") => ReplayMode::Sloppy,
            Some("strict") => ReplayMode::Strict,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "REPLAY_MODE",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            analysis_url,
            health_url,
            request_timeout,
            board_poll_interval,
            placement,
            arrow_style,
            replay_mode,
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

fn url_var<F>(lookup: &F, name: &'static str, default: String) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name).unwrap_or(default);
    reqwest::Url::parse(&value).map_err(|_| ConfigError::InvalidUrl {
        name,
        value: value.clone(),
    })?;
    Ok(value)
}
