//! User-facing settings read by the search controller and badge cache.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Results per page when nothing is configured.
pub const DEFAULT_LIMIT: u32 = 20;
/// Upper bound the catalog accepts for a page.
pub const MAX_LIMIT: u32 = 100;

/// Catalog category browsed when the search text is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    #[default]
    Top,
    TrendingDay,
    TrendingWeek,
    TrendingMonth,
    Featured,
    New,
    Global,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Popularity,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Descending,
    Ascending,
}

/// CDN image scale inserted into chat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    #[serde(rename = "1x")]
    X1,
    #[serde(rename = "2x")]
    X2,
    #[serde(rename = "3x")]
    X3,
    #[default]
    #[serde(rename = "4x")]
    X4,
}

/// Settings snapshot. Owned by the host's settings store; read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub exact_match: bool,
    pub case_sensitive: bool,
    pub ignore_tags: bool,
    pub zero_width: bool,
    pub animated_only: bool,
    pub show_badges: bool,
    pub limit: u32,
    pub category: Category,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub image_size: ImageSize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            exact_match: false,
            case_sensitive: false,
            ignore_tags: false,
            zero_width: false,
            animated_only: false,
            show_badges: true,
            limit: DEFAULT_LIMIT,
            category: Category::default(),
            sort_field: SortField::default(),
            sort_order: SortOrder::default(),
            image_size: ImageSize::default(),
        }
    }
}

impl Settings {
    /// Page size clamped to what the catalog accepts.
    pub fn page_limit(&self) -> u32 {
        self.limit.clamp(1, MAX_LIMIT)
    }
}

/// Error for settings values that name no known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "TOP" => Ok(Self::Top),
            "TRENDING_DAY" => Ok(Self::TrendingDay),
            "TRENDING_WEEK" => Ok(Self::TrendingWeek),
            "TRENDING_MONTH" => Ok(Self::TrendingMonth),
            "FEATURED" => Ok(Self::Featured),
            "NEW" => Ok(Self::New),
            "GLOBAL" => Ok(Self::Global),
            _ => Err(UnknownVariant::new("category", s)),
        }
    }
}

impl FromStr for SortField {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "popularity" => Ok(Self::Popularity),
            "created_at" | "date" => Ok(Self::CreatedAt),
            _ => Err(UnknownVariant::new("sort field", s)),
        }
    }
}

impl FromStr for SortOrder {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desc" | "descending" => Ok(Self::Descending),
            "asc" | "ascending" => Ok(Self::Ascending),
            _ => Err(UnknownVariant::new("sort order", s)),
        }
    }
}

impl FromStr for ImageSize {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "1x" => Ok(Self::X1),
            "2" | "2x" => Ok(Self::X2),
            "3" | "3x" => Ok(Self::X3),
            "4" | "4x" => Ok(Self::X4),
            _ => Err(UnknownVariant::new("image size", s)),
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::X1 => "1x",
            Self::X2 => "2x",
            Self::X3 => "3x",
            Self::X4 => "4x",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.show_badges);
        assert!(!settings.exact_match);
        assert_eq!(settings.page_limit(), DEFAULT_LIMIT);
        assert_eq!(settings.image_size.to_string(), "4x");
    }

    #[test]
    fn test_limit_is_clamped() {
        let mut settings = Settings {
            limit: 0,
            ..Settings::default()
        };
        assert_eq!(settings.page_limit(), 1);
        settings.limit = 5000;
        assert_eq!(settings.page_limit(), MAX_LIMIT);
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!("trending-week".parse::<Category>(), Ok(Category::TrendingWeek));
        assert_eq!("asc".parse::<SortOrder>(), Ok(SortOrder::Ascending));
        assert_eq!("created_at".parse::<SortField>(), Ok(SortField::CreatedAt));
        assert_eq!("2x".parse::<ImageSize>(), Ok(ImageSize::X2));
        assert!("huge".parse::<ImageSize>().is_err());
    }

    #[test]
    fn test_partial_settings_deserialize_with_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "animated_only": true, "category": "TRENDING_DAY" }"#).unwrap();
        assert!(settings.animated_only);
        assert_eq!(settings.category, Category::TrendingDay);
        assert_eq!(settings.limit, DEFAULT_LIMIT);
    }
}
