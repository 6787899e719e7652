//! Environment-driven configuration for the binaries.
//!
//! Values are read through a lookup function so tests can supply a map
//! instead of mutating the process environment.

use crate::directory::domain::UserId;
use crate::notification::domain::GateSettings;
use camino::Utf8PathBuf;
use chrono::FixedOffset;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Primary database URL key.
pub const DATABASE_URL: &str = "ITINERARY_DATABASE_URL";
/// Fallback database URL key.
pub const FALLBACK_DATABASE_URL: &str = "DATABASE_URL";
/// Connection pool size key.
pub const DB_POOL_SIZE: &str = "ITINERARY_DB_POOL_SIZE";
/// Bind host key.
pub const HOST: &str = "HOST";
/// Bind port key.
pub const PORT: &str = "PORT";
/// Identity provider base URL key.
pub const AUTH_URL: &str = "ITINERARY_AUTH_URL";
/// Identity provider service-role key.
pub const SERVICE_ROLE_KEY: &str = "ITINERARY_SERVICE_ROLE_KEY";
/// Local UTC offset in minutes key.
pub const UTC_OFFSET_MINUTES: &str = "ITINERARY_UTC_OFFSET_MINUTES";
/// Delay before the first reminder key.
pub const NOTIFY_INITIAL_DELAY_SECS: &str = "ITINERARY_NOTIFY_INITIAL_DELAY_SECS";
/// Reminder interval key.
pub const NOTIFY_INTERVAL_SECS: &str = "ITINERARY_NOTIFY_INTERVAL_SECS";
/// Business-hours enforcement key.
pub const NOTIFY_ENFORCE_BUSINESS_HOURS: &str = "ITINERARY_NOTIFY_ENFORCE_BUSINESS_HOURS";
/// Assignment poll interval key.
pub const ASSIGNMENT_POLL_SECS: &str = "ITINERARY_ASSIGNMENT_POLL_SECS";
/// Marker directory key.
pub const MARKER_DIR: &str = "ITINERARY_MARKER_DIR";
/// Reminder identity key.
pub const REMINDER_USER_ID: &str = "ITINERARY_REMINDER_USER_ID";

const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_UTC_OFFSET_MINUTES: i32 = -180;
const DEFAULT_INITIAL_DELAY_SECS: u64 = 5;
const DEFAULT_INTERVAL_SECS: u64 = 3_600;
const DEFAULT_ASSIGNMENT_POLL_SECS: u64 = 30;
const SECONDS_PER_MINUTE: i32 = 60;

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required key is unset or blank.
    #[error("missing required setting {0}")]
    Missing(&'static str),
    /// A key holds a value that cannot be used.
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        /// The offending key.
        key: &'static str,
        /// The raw value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings shared by the server and the reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Maximum pooled connections.
    pub pool_size: u32,
    /// Bind host for the HTTP server.
    pub host: String,
    /// Bind port for the HTTP server.
    pub port: u16,
    /// Identity provider base URL, when configured.
    pub auth_url: Option<String>,
    /// Identity provider service-role key, when configured.
    pub service_role_key: Option<String>,
    /// Notification gate settings.
    pub gate: GateSettings,
    /// How often the reminder looks for new assignments.
    pub assignment_poll_interval: Duration,
    /// Directory holding the persisted reminder marker.
    pub marker_dir: Utf8PathBuf,
    /// Identity the reminder runs for, when configured.
    pub reminder_user_id: Option<UserId>,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Self::from_lookup`].
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`.
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] without a database URL and
    /// [`ConfigError::Invalid`] for unparsable values.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let database_url = get(DATABASE_URL)
            .or_else(|| get(FALLBACK_DATABASE_URL))
            .ok_or(ConfigError::Missing(DATABASE_URL))?;
        let pool_size = parse_or(get(DB_POOL_SIZE), DB_POOL_SIZE, DEFAULT_POOL_SIZE)?;
        if pool_size == 0 {
            return Err(invalid(DB_POOL_SIZE, "0", "must be at least 1"));
        }
        let port = parse_or(get(PORT), PORT, DEFAULT_PORT)?;
        let offset_minutes = parse_or(
            get(UTC_OFFSET_MINUTES),
            UTC_OFFSET_MINUTES,
            DEFAULT_UTC_OFFSET_MINUTES,
        )?;
        let utc_offset = offset_minutes
            .checked_mul(SECONDS_PER_MINUTE)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                invalid(
                    UTC_OFFSET_MINUTES,
                    &offset_minutes.to_string(),
                    "offset out of range",
                )
            })?;
        let initial_delay = parse_or(
            get(NOTIFY_INITIAL_DELAY_SECS),
            NOTIFY_INITIAL_DELAY_SECS,
            DEFAULT_INITIAL_DELAY_SECS,
        )?;
        let interval = parse_or(
            get(NOTIFY_INTERVAL_SECS),
            NOTIFY_INTERVAL_SECS,
            DEFAULT_INTERVAL_SECS,
        )?;
        if interval == 0 {
            return Err(invalid(NOTIFY_INTERVAL_SECS, "0", "must be at least 1"));
        }
        let assignment_poll = parse_or(
            get(ASSIGNMENT_POLL_SECS),
            ASSIGNMENT_POLL_SECS,
            DEFAULT_ASSIGNMENT_POLL_SECS,
        )?;
        if assignment_poll == 0 {
            return Err(invalid(ASSIGNMENT_POLL_SECS, "0", "must be at least 1"));
        }
        let enforce = get(NOTIFY_ENFORCE_BUSINESS_HOURS)
            .map(|raw| parse_flag(NOTIFY_ENFORCE_BUSINESS_HOURS, &raw))
            .transpose()?
            .unwrap_or(true);
        let reminder_user_id = get(REMINDER_USER_ID)
            .map(|raw| {
                raw.parse::<uuid::Uuid>()
                    .map(UserId::from_uuid)
                    .map_err(|err| invalid(REMINDER_USER_ID, &raw, &err.to_string()))
            })
            .transpose()?;

        Ok(Self {
            database_url,
            pool_size,
            host: get(HOST).unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port,
            auth_url: get(AUTH_URL),
            service_role_key: get(SERVICE_ROLE_KEY),
            gate: GateSettings::default()
                .with_initial_delay(Duration::from_secs(initial_delay))
                .with_interval(Duration::from_secs(interval))
                .with_utc_offset(utc_offset)
                .with_enforce_business_hours(enforce),
            assignment_poll_interval: Duration::from_secs(assignment_poll),
            marker_dir: get(MARKER_DIR).map_or_else(|| Utf8PathBuf::from("."), Utf8PathBuf::from),
            reminder_user_id,
        })
    }

    /// Returns the identity provider URL and key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming the first unset key.
    pub fn identity_credentials(&self) -> ConfigResult<(&str, &str)> {
        let url = self.auth_url.as_deref().ok_or(ConfigError::Missing(AUTH_URL))?;
        let key = self
            .service_role_key
            .as_deref()
            .ok_or(ConfigError::Missing(SERVICE_ROLE_KEY))?;
        Ok((url, key))
    }

    /// Returns the `host:port` bind address.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(raw: Option<String>, key: &'static str, default: T) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.map_or(Ok(default), |value| {
        value
            .parse::<T>()
            .map_err(|err| invalid(key, &value, &err.to_string()))
    })
}

fn parse_flag(key: &'static str, raw: &str) -> ConfigResult<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, raw, "expected true or false")),
    }
}

fn invalid(key: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_owned(),
        reason: reason.to_owned(),
    }
}
