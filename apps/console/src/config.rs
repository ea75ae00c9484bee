use std::{collections::HashMap, fs};

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8443".into(),
        }
    }
}

/// Layering: defaults, then `console.toml` in the working directory,
/// then the `EXAMDESK_SERVER_URL` environment variable.
pub fn load_settings() -> Settings {
    settings_from_sources(
        fs::read_to_string("console.toml").ok().as_deref(),
        std::env::var("EXAMDESK_SERVER_URL").ok(),
    )
}

fn settings_from_sources(file_raw: Option<&str>, env_url: Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file_raw {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
            if let Some(v) = file_cfg.get("server_url") {
                settings.server_url = v.clone();
            }
        }
    }

    if let Some(v) = env_url {
        settings.server_url = v;
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_file_or_env() {
        let settings = settings_from_sources(None, None);
        assert_eq!(settings.server_url, Settings::default().server_url);
    }

    #[test]
    fn file_value_overrides_the_default() {
        let settings =
            settings_from_sources(Some("server_url = \"http://registry.campus:9000\"\n"), None);
        assert_eq!(settings.server_url, "http://registry.campus:9000");
    }

    #[test]
    fn env_value_wins_over_the_file() {
        let settings = settings_from_sources(
            Some("server_url = \"http://registry.campus:9000\"\n"),
            Some("http://staging.campus:9100".to_string()),
        );
        assert_eq!(settings.server_url, "http://staging.campus:9100");
    }

    #[test]
    fn malformed_file_is_ignored() {
        let settings = settings_from_sources(Some("server_url = [not toml"), None);
        assert_eq!(settings.server_url, Settings::default().server_url);
    }
}
