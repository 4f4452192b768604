use crate::extract::SelectorTable;
use crate::ConfigError;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Prensa
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperSettings,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(rename = "portal", default)]
    pub portals: Vec<PortalEntry>,
}

/// Run-wide pacing and timeout defaults
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperSettings {
    /// Pause before each request after the first of a portal run (seconds)
    #[serde(rename = "request-delay", default = "default_request_delay")]
    pub request_delay: f64,

    /// Pause before each portal after the first (seconds)
    #[serde(rename = "portal-delay", default = "default_portal_delay")]
    pub portal_delay: f64,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_request_delay() -> f64 {
    1.0
}

fn default_portal_delay() -> f64 {
    2.0
}

fn default_timeout() -> u64 {
    10
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            request_delay: default_request_delay(),
            portal_delay: default_portal_delay(),
            timeout: default_timeout(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Sent verbatim when present, the other fields are then ignored
    #[serde(default)]
    pub raw: Option<String>,

    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default = "default_contact_url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email", default = "default_contact_email")]
    pub contact_email: String,
}

fn default_crawler_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_contact_url() -> String {
    "https://example.com/prensa".to_string()
}

fn default_contact_email() -> String {
    "admin@example.com".to_string()
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            raw: None,
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: default_contact_url(),
            contact_email: default_contact_email(),
        }
    }
}

impl UserAgentConfig {
    /// Value of the User-Agent header
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)` unless a raw
    /// string is configured.
    pub fn header_value(&self) -> String {
        match self.raw.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw.to_string(),
            _ => format!(
                "{}/{} (+{}; {})",
                self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
            ),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the CSV export
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,

    /// Path of the JSON export
    #[serde(rename = "json-path", default = "default_json_path")]
    pub json_path: String,

    /// Path of the markdown run report, none when absent
    #[serde(rename = "report-path", default)]
    pub report_path: Option<String>,
}

fn default_csv_path() -> String {
    "news_data.csv".to_string()
}

fn default_json_path() -> String {
    "news_data.json".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            json_path: default_json_path(),
            report_path: None,
        }
    }
}

/// One `[[portal]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct PortalEntry {
    /// Newspaper name, copied into every record of the portal
    pub name: String,

    /// Built-in adapter id; derived from the name when absent
    #[serde(default)]
    pub adapter: Option<String>,

    /// Listing pages, crawled in order
    pub seeds: Vec<String>,

    #[serde(rename = "request-delay", default)]
    pub request_delay: Option<f64>,

    #[serde(rename = "portal-delay", default)]
    pub portal_delay: Option<f64>,

    #[serde(default)]
    pub timeout: Option<u64>,

    /// Custom selector table, takes precedence over any built-in adapter
    #[serde(default)]
    pub selectors: Option<SelectorTable>,
}

/// Effective pacing of one portal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub request_delay: Duration,
    pub portal_delay: Duration,
    pub timeout: Duration,
}

impl ScraperSettings {
    /// Resolves the pacing of a portal, applying its overrides
    pub fn pacing_for(&self, portal: &PortalEntry) -> Result<Pacing, ConfigError> {
        Ok(Pacing {
            request_delay: delay_from_secs(
                "request-delay",
                portal.request_delay.unwrap_or(self.request_delay),
            )?,
            portal_delay: delay_from_secs(
                "portal-delay",
                portal.portal_delay.unwrap_or(self.portal_delay),
            )?,
            timeout: Duration::from_secs(portal.timeout.unwrap_or(self.timeout)),
        })
    }
}

/// Converts a configured delay in seconds into a [`Duration`]
///
/// Negative, non-finite and unrepresentably large values are rejected.
pub(crate) fn delay_from_secs(name: &str, seconds: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(seconds).map_err(|_| {
        ConfigError::Validation(format!(
            "{} must be a finite number of seconds >= 0, got {}",
            name, seconds
        ))
    })
}

impl Config {
    /// Keeps only the named portals, in configured order
    ///
    /// Names are matched case-insensitively. An unknown name is a validation
    /// error.
    pub fn retain_portals(&mut self, names: &[String]) -> Result<(), ConfigError> {
        if names.is_empty() {
            return Ok(());
        }

        if let Some(unknown) = names.iter().find(|name| {
            !self
                .portals
                .iter()
                .any(|portal| portal.name.trim().eq_ignore_ascii_case(name.trim()))
        }) {
            return Err(ConfigError::Validation(format!(
                "No portal named '{}' is configured",
                unknown
            )));
        }

        self.portals.retain(|portal| {
            names
                .iter()
                .any(|name| portal.name.trim().eq_ignore_ascii_case(name.trim()))
        });
        Ok(())
    }

    /// Keeps only the first `max` seeds of every portal
    pub fn limit_seeds(&mut self, max: usize) {
        for portal in &mut self.portals {
            portal.seeds.truncate(max.max(1));
        }
    }
}
