//! Runtime configuration loaded from environment variables.

use std::str::FromStr;

use seventv_client::settings::{DEFAULT_LIMIT, Settings};
use seventv_client::{API_BASE, GQL_URL};

const PREFIX: &str = "FAKEMOTE_";

/// Runtime configuration for the host adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub settings: Settings,
    pub gql_url: String,
    pub api_base: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            gql_url: GQL_URL.into(),
            api_base: API_BASE.into(),
        }
    }
}

impl AppConfig {
    /// Load from `FAKEMOTE_*` environment variables.
    pub fn from_env() -> Self {
        Self::load(|key| std::env::var(format!("{PREFIX}{key}")).ok())
    }

    /// Load from any key lookup. Missing or invalid values keep their defaults.
    pub fn load(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let g = |key: &str| -> String { lookup(key).unwrap_or_default().trim().to_string() };
        let defaults = Settings::default();

        let settings = Settings {
            exact_match: parse_bool(&g("EXACT_MATCH"), defaults.exact_match),
            case_sensitive: parse_bool(&g("CASE_SENSITIVE"), defaults.case_sensitive),
            ignore_tags: parse_bool(&g("IGNORE_TAGS"), defaults.ignore_tags),
            zero_width: parse_bool(&g("ZERO_WIDTH"), defaults.zero_width),
            animated_only: parse_bool(&g("ANIMATED_ONLY"), defaults.animated_only),
            show_badges: parse_bool(&g("SHOW_BADGES"), defaults.show_badges),
            limit: parse_or(&g("LIMIT"), DEFAULT_LIMIT),
            category: parse_or(&g("CATEGORY"), defaults.category),
            sort_field: parse_or(&g("SORT_FIELD"), defaults.sort_field),
            sort_order: parse_or(&g("SORT_ORDER"), defaults.sort_order),
            image_size: parse_or(&g("IMAGE_SIZE"), defaults.image_size),
        };

        Self {
            settings,
            gql_url: non_empty_or(g("GQL_URL"), GQL_URL),
            api_base: non_empty_or(g("API_BASE"), API_BASE),
        }
    }
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => true,
        "false" | "0" | "no" | "off" => false,
        _ => default,
    }
}

fn parse_or<T: FromStr>(s: &str, default: T) -> T {
    if s.is_empty() {
        return default;
    }
    match s.parse() {
        Ok(v) => v,
        Err(_) => {
            tracing::warn!(value = s, "Ignoring invalid setting value");
            default
        }
    }
}

fn non_empty_or(s: String, default: &str) -> String {
    if s.is_empty() { default.into() } else { s }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use seventv_client::settings::{Category, ImageSize, SortOrder};

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::load(|key| map.get(key).cloned())
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        assert_eq!(load(&[]), AppConfig::default());
    }

    #[test]
    fn test_values_are_parsed() {
        let config = load(&[
            ("EXACT_MATCH", "true"),
            ("SHOW_BADGES", "off"),
            ("LIMIT", "50"),
            ("CATEGORY", "trending_month"),
            ("SORT_ORDER", "asc"),
            ("IMAGE_SIZE", "2x"),
            ("GQL_URL", "http://127.0.0.1:9000/gql"),
        ]);
        assert!(config.settings.exact_match);
        assert!(!config.settings.show_badges);
        assert_eq!(config.settings.limit, 50);
        assert_eq!(config.settings.category, Category::TrendingMonth);
        assert_eq!(config.settings.sort_order, SortOrder::Ascending);
        assert_eq!(config.settings.image_size, ImageSize::X2);
        assert_eq!(config.gql_url, "http://127.0.0.1:9000/gql");
        assert_eq!(config.api_base, API_BASE);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = load(&[("LIMIT", "lots"), ("CATEGORY", "best"), ("ZERO_WIDTH", "maybe")]);
        assert_eq!(config.settings, Settings::default());
    }
}
