use crate::config::types::{
    delay_from_secs, Config, OutputConfig, PortalEntry, ScraperSettings, UserAgentConfig,
};
use crate::extract::build_adapter;
use crate::url::parse_http_url;
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
///
/// Every portal is also bound to its extraction adapter here, so a missing
/// adapter or a broken selector surfaces before any request is made.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_settings(&config.scraper)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_portals(&config.portals)?;
    Ok(())
}

impl Config {
    /// Re-validates a configuration built or edited in code
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate(self)
    }
}

/// Validates pacing defaults
fn validate_scraper_settings(settings: &ScraperSettings) -> Result<(), ConfigError> {
    validate_delay("request-delay", settings.request_delay)?;
    validate_delay("portal-delay", settings.portal_delay)?;
    validate_timeout(settings.timeout)?;
    Ok(())
}

fn validate_delay(name: &str, seconds: f64) -> Result<(), ConfigError> {
    delay_from_secs(name, seconds).map(|_| ())
}

fn validate_timeout(seconds: u64) -> Result<(), ConfigError> {
    if seconds < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout must be >= 1s, got {}s",
            seconds
        )));
    }
    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if let Some(raw) = &config.raw {
        if raw.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user-agent raw string cannot be empty".to_string(),
            ));
        }
        return Ok(());
    }

    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation("csv_path cannot be empty".to_string()));
    }

    if config.json_path.is_empty() {
        return Err(ConfigError::Validation("json_path cannot be empty".to_string()));
    }

    if matches!(&config.report_path, Some(path) if path.is_empty()) {
        return Err(ConfigError::Validation(
            "report_path cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates portal entries and binds each one to an adapter
fn validate_portals(portals: &[PortalEntry]) -> Result<(), ConfigError> {
    if portals.is_empty() {
        return Err(ConfigError::NoPortals);
    }

    let mut names = HashSet::new();

    for portal in portals {
        let name = portal.name.trim();
        if name.is_empty() {
            return Err(ConfigError::Validation(
                "Portal name cannot be empty".to_string(),
            ));
        }

        if !names.insert(name) {
            return Err(ConfigError::Validation(format!(
                "Portal '{}' is configured more than once",
                name
            )));
        }

        if portal.seeds.is_empty() {
            return Err(ConfigError::Validation(format!(
                "Portal '{}' must have at least one seed URL",
                name
            )));
        }

        for seed in &portal.seeds {
            parse_http_url(seed).map_err(|e| {
                ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e))
            })?;
        }

        if let Some(delay) = portal.request_delay {
            validate_delay("request-delay", delay)?;
        }
        if let Some(delay) = portal.portal_delay {
            validate_delay("portal-delay", delay)?;
        }
        if let Some(timeout) = portal.timeout {
            validate_timeout(timeout)?;
        }

        build_adapter(name, portal.adapter.as_deref(), portal.selectors.as_ref())?;
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    // Basic email format check: must contain @ and have text on both sides
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::builtin_config;
    use crate::config::parser::parse_config;

    fn entry(name: &str, seeds: &[&str]) -> PortalEntry {
        PortalEntry {
            name: name.to_string(),
            adapter: None,
            seeds: seeds.iter().map(|s| s.to_string()).collect(),
            request_delay: None,
            portal_delay: None,
            timeout: None,
            selectors: None,
        }
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("admin@sub.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
    }

    #[test]
    fn test_validate_delays() {
        assert!(validate_delay("request-delay", 0.0).is_ok());
        assert!(validate_delay("request-delay", 1.5).is_ok());
        assert!(validate_delay("request-delay", -1.0).is_err());
        assert!(validate_delay("request-delay", f64::NAN).is_err());
        assert!(validate_delay("request-delay", f64::INFINITY).is_err());
        assert!(validate_delay("request-delay", 1e30).is_err());
        assert!(validate_timeout(0).is_err());
        assert!(validate_timeout(1).is_ok());
    }

    #[test]
    fn test_no_portals() {
        assert!(matches!(validate_portals(&[]), Err(ConfigError::NoPortals)));
    }

    #[test]
    fn test_duplicate_portal_names() {
        let portals = vec![
            entry("MDZ", &["https://www.mdzol.com/politica"]),
            entry(" MDZ ", &["https://www.mdzol.com/sociedad"]),
        ];
        assert!(matches!(
            validate_portals(&portals),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_portal_without_seeds() {
        let portals = vec![entry("MDZ", &[])];
        assert!(matches!(
            validate_portals(&portals),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_seed_must_be_http() {
        let portals = vec![entry("MDZ", &["ftp://www.mdzol.com/politica"])];
        assert!(matches!(
            validate_portals(&portals),
            Err(ConfigError::InvalidUrl(_))
        ));

        let portals = vec![entry("MDZ", &["/politica"])];
        assert!(matches!(
            validate_portals(&portals),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_unknown_adapter() {
        let portals = vec![entry("La Gaceta", &["https://www.lagaceta.com.ar/"])];
        assert!(matches!(
            validate_portals(&portals),
            Err(ConfigError::MissingAdapter { .. })
        ));
    }

    #[test]
    fn test_raw_user_agent_skips_parts() {
        let config = UserAgentConfig {
            raw: Some("Mozilla/5.0".to_string()),
            crawler_name: "not valid!".to_string(),
            ..UserAgentConfig::default()
        };
        assert!(validate_user_agent_config(&config).is_ok());

        let config = UserAgentConfig {
            raw: Some("  ".to_string()),
            ..UserAgentConfig::default()
        };
        assert!(validate_user_agent_config(&config).is_err());
    }

    #[test]
    fn test_crawler_name_rules() {
        let config = UserAgentConfig {
            crawler_name: "prensa bot".to_string(),
            ..UserAgentConfig::default()
        };
        assert!(validate_user_agent_config(&config).is_err());
        assert!(validate_user_agent_config(&UserAgentConfig::default()).is_ok());
    }

    #[test]
    fn test_portal_override_validated() {
        let mut config = builtin_config();
        config.portals[1].timeout = Some(0);
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_unrepresentable_delay_rejected() {
        let global = r#"
[scraper]
request-delay = 1e30

[[portal]]
name = "MDZ"
seeds = ["https://www.mdzol.com/politica"]
"#;
        assert!(matches!(
            parse_config(global),
            Err(ConfigError::Validation(_))
        ));

        let per_portal = r#"
[[portal]]
name = "MDZ"
seeds = ["https://www.mdzol.com/politica"]
request-delay = 1e30
"#;
        assert!(matches!(
            parse_config(per_portal),
            Err(ConfigError::Validation(_))
        ));

        let mut config = builtin_config();
        config.portals[2].portal_delay = Some(1e30);
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
        assert!(config.scraper.pacing_for(&config.portals[2]).is_err());
    }
}
