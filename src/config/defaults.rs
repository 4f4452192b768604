use crate::config::types::{
    Config, OutputConfig, PortalEntry, ScraperSettings, UserAgentConfig,
};

/// Browser user agent used by the built-in configuration
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

fn portal(name: &str, adapter: &str, seeds: &[&str]) -> PortalEntry {
    PortalEntry {
        name: name.to_string(),
        adapter: Some(adapter.to_string()),
        seeds: seeds.iter().map(|s| s.to_string()).collect(),
        request_delay: None,
        portal_delay: None,
        timeout: None,
        selectors: None,
    }
}

/// Configuration used when no config file is given: the four Mendoza portals
pub fn builtin_config() -> Config {
    Config {
        scraper: ScraperSettings::default(),
        user_agent: UserAgentConfig {
            raw: Some(BROWSER_USER_AGENT.to_string()),
            ..UserAgentConfig::default()
        },
        output: OutputConfig::default(),
        portals: vec![
            portal(
                "Los Andes",
                "los-andes",
                &[
                    "https://www.losandes.com.ar/temas/mendoza",
                    "https://www.losandes.com.ar/temas/mendoza/1",
                    "https://www.losandes.com.ar/temas/mendoza/2",
                ],
            ),
            portal(
                "Diario UNO",
                "diario-uno",
                &["https://www.diariouno.com.ar/politica"],
            ),
            portal("El Sol", "el-sol", &["https://www.elsol.com.ar/mendoza/"]),
            portal("MDZ", "mdz", &["https://www.mdzol.com/politica"]),
        ],
    }
}
