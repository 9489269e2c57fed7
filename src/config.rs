//! Page Configuration
//!
//! Values the server template embeds in `<meta>` tags and `<body>` data
//! attributes, read once at startup.

use std::str::FromStr;

use log::LevelFilter;

use crate::dom;

/// Startup settings of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    /// Sent as `X-CSRFToken` on non-GET requests
    pub csrf_token: Option<String>,
    /// Id of the entity the page edits (work, person, issue, ...)
    pub item_id: Option<i64>,
    pub log_level: LevelFilter,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            csrf_token: None,
            item_id: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl PageConfig {
    /// Read `<meta name="csrf-token">`, `<meta name="item-id">` (or
    /// `<body data-item-id>`) and `<meta name="log-level">`.
    pub fn from_document() -> Self {
        let item_id = dom::meta_content("item-id")
            .or_else(|| dom::body_data("item-id"));
        Self::from_raw(
            dom::meta_content("csrf-token").as_deref(),
            item_id.as_deref(),
            dom::meta_content("log-level").as_deref(),
        )
    }

    pub fn from_raw(csrf: Option<&str>, item_id: Option<&str>, level: Option<&str>) -> Self {
        Self {
            csrf_token: csrf
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            item_id: item_id.and_then(parse_item_id),
            log_level: level
                .and_then(|l| LevelFilter::from_str(l.trim()).ok())
                .unwrap_or(LevelFilter::Info),
        }
    }
}

/// Item ids are rendered either bare (`42`) or JSON-quoted (`"42"`).
pub fn parse_item_id(raw: &str) -> Option<i64> {
    raw.trim().trim_matches('"').parse().ok()
}
