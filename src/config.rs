//! Site settings read from `data-*` attributes on the mount element.
//!
//! Every setting has a default. A value that is present but unusable is
//! reported with a warning and replaced by the default, so a typo in the
//! page never stops the site from rendering.

use std::time::Duration;

use thiserror::Error;
use tracing::warn;
use url::Url;

pub const LOG_KEY: &str = "data-log";
pub const RELAY_ENDPOINT_KEY: &str = "data-relay-endpoint";
pub const RELAY_KEY_KEY: &str = "data-relay-key";
pub const RELAY_SUBJECT_KEY: &str = "data-relay-subject";
pub const BANNER_SECONDS_KEY: &str = "data-banner-seconds";
pub const PARTICLES_KEY: &str = "data-particles";
pub const MAGNETIC_DAMPING_KEY: &str = "data-magnetic-damping";
pub const REDUCED_MOTION_KEY: &str = "data-reduced-motion";

pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.web3forms.com/submit";
pub const DEFAULT_RELAY_SUBJECT: &str = "New Contact Form Submission from Portfolio";
const DEFAULT_BANNER_SECONDS: u64 = 5;
const BANNER_SECONDS_BOUNDS: (u64, u64) = (1, 30);
const DEFAULT_PARTICLES: usize = 30;
const PARTICLES_BOUNDS: (usize, usize) = (0, 200);
const DEFAULT_MAGNETIC_DAMPING: f64 = 0.1;
const MAGNETIC_DAMPING_BOUNDS: (f64, f64) = (0.0, 1.0);

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key}: `{value}` is not a number")]
    NotANumber { key: &'static str, value: String },
    #[error("{key}: {value} is outside {min}..={max}")]
    OutOfRange {
        key: &'static str,
        value: String,
        min: String,
        max: String,
    },
    #[error("{key}: `{value}` is not an http(s) URL")]
    NotHttpUrl { key: &'static str, value: String },
    #[error("{key}: expected `true` or `false`, got `{value}`")]
    NotABool { key: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub log_filter: String,
    /// Always an absolute http(s) URL.
    pub relay_endpoint: String,
    pub relay_key: Option<String>,
    pub relay_subject: String,
    pub banner_timeout: Duration,
    pub particles: usize,
    pub magnetic_damping: f64,
    pub reduced_motion: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            relay_endpoint: DEFAULT_RELAY_ENDPOINT.to_string(),
            relay_key: None,
            relay_subject: DEFAULT_RELAY_SUBJECT.to_string(),
            banner_timeout: Duration::from_secs(DEFAULT_BANNER_SECONDS),
            particles: DEFAULT_PARTICLES,
            magnetic_damping: DEFAULT_MAGNETIC_DAMPING,
            reduced_motion: false,
        }
    }
}

impl SiteConfig {
    /// Builds the config from an attribute lookup such as
    /// `|key| element.get_attribute(key)`, warning about every fallback.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let (config, fallbacks) = Self::resolve(lookup);
        for error in fallbacks {
            warn!(%error, "config_fallback");
        }
        config
    }

    /// Like [`SiteConfig::from_lookup`] but hands the fallbacks back, for
    /// callers that install the subscriber from `log_filter` first.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<ConfigError>) {
        let defaults = Self::default();
        let read = |key: &str| non_empty(lookup(key));
        let mut fallbacks = Vec::new();

        let relay_endpoint = setting(
            read(RELAY_ENDPOINT_KEY),
            defaults.relay_endpoint,
            &mut fallbacks,
            |value| parse_http_url(RELAY_ENDPOINT_KEY, value).map(String::from),
        );
        let banner_seconds = setting(
            read(BANNER_SECONDS_KEY),
            DEFAULT_BANNER_SECONDS,
            &mut fallbacks,
            |value| parse_u64_with_bounds(BANNER_SECONDS_KEY, value, BANNER_SECONDS_BOUNDS),
        );
        let particles = setting(read(PARTICLES_KEY), defaults.particles, &mut fallbacks, |value| {
            parse_usize_with_bounds(PARTICLES_KEY, value, PARTICLES_BOUNDS)
        });
        let magnetic_damping = setting(
            read(MAGNETIC_DAMPING_KEY),
            defaults.magnetic_damping,
            &mut fallbacks,
            |value| parse_f64_with_bounds(MAGNETIC_DAMPING_KEY, value, MAGNETIC_DAMPING_BOUNDS),
        );
        let reduced_motion = setting(
            read(REDUCED_MOTION_KEY),
            defaults.reduced_motion,
            &mut fallbacks,
            |value| parse_bool(REDUCED_MOTION_KEY, value),
        );

        let config = Self {
            log_filter: read(LOG_KEY).unwrap_or(defaults.log_filter),
            relay_endpoint,
            relay_key: read(RELAY_KEY_KEY),
            relay_subject: read(RELAY_SUBJECT_KEY).unwrap_or(defaults.relay_subject),
            banner_timeout: Duration::from_secs(banner_seconds),
            particles,
            magnetic_damping,
            reduced_motion,
        };
        (config, fallbacks)
    }
}

fn setting<T>(
    raw: Option<String>,
    default: T,
    fallbacks: &mut Vec<ConfigError>,
    parse: impl FnOnce(&str) -> Result<T, ConfigError>,
) -> T {
    let Some(raw) = raw else {
        return default;
    };
    parse(&raw).unwrap_or_else(|error| {
        fallbacks.push(error);
        default
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn out_of_range<T: ToString>(key: &'static str, value: &str, bounds: (T, T)) -> ConfigError {
    ConfigError::OutOfRange {
        key,
        value: value.to_string(),
        min: bounds.0.to_string(),
        max: bounds.1.to_string(),
    }
}

fn not_a_number(key: &'static str, value: &str) -> ConfigError {
    ConfigError::NotANumber {
        key,
        value: value.to_string(),
    }
}

pub fn parse_u64_with_bounds(
    key: &'static str,
    value: &str,
    bounds: (u64, u64),
) -> Result<u64, ConfigError> {
    let parsed = value.trim().parse::<u64>().map_err(|_| not_a_number(key, value))?;
    if (bounds.0..=bounds.1).contains(&parsed) {
        Ok(parsed)
    } else {
        Err(out_of_range(key, value, bounds))
    }
}

pub fn parse_usize_with_bounds(
    key: &'static str,
    value: &str,
    bounds: (usize, usize),
) -> Result<usize, ConfigError> {
    let parsed = value.trim().parse::<usize>().map_err(|_| not_a_number(key, value))?;
    if (bounds.0..=bounds.1).contains(&parsed) {
        Ok(parsed)
    } else {
        Err(out_of_range(key, value, bounds))
    }
}

pub fn parse_f64_with_bounds(
    key: &'static str,
    value: &str,
    bounds: (f64, f64),
) -> Result<f64, ConfigError> {
    let parsed = value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .ok_or_else(|| not_a_number(key, value))?;
    if (bounds.0..=bounds.1).contains(&parsed) {
        Ok(parsed)
    } else {
        Err(out_of_range(key, value, bounds))
    }
}

pub fn parse_http_url(key: &'static str, value: &str) -> Result<Url, ConfigError> {
    let not_http = || ConfigError::NotHttpUrl {
        key,
        value: value.to_string(),
    };
    let parsed = Url::parse(value.trim()).map_err(|_| not_http())?;

    if parsed.scheme() == "http" || parsed.scheme() == "https" {
        Ok(parsed)
    } else {
        Err(not_http())
    }
}

pub fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::NotABool {
            key,
            value: value.to_string(),
        }),
    }
}
