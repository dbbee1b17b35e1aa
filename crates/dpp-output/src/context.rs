//! JSON-LD context URLs attached to every generated record.

use serde::{Deserialize, Serialize};

/// Base URL the published contexts live under.
pub const DEFAULT_CONTEXT_BASE: &str = "https://dpp-keystone.org/spec/contexts/v1/";

/// Context shared by every sector.
pub const CORE_CONTEXT: &str = "dpp-core.context.jsonld";

/// Where record contexts are resolved from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    pub base_url: String,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CONTEXT_BASE.to_string(),
        }
    }
}

impl ContextConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Core context first, then one context per sector in the given order.
    pub fn context_urls(&self, sectors: &[String]) -> Vec<String> {
        let base = self.base_url.trim_end_matches('/');
        std::iter::once(CORE_CONTEXT.to_string())
            .chain(
                sectors
                    .iter()
                    .map(|sector| format!("dpp-{}.context.jsonld", sector.trim())),
            )
            .map(|file| format!("{base}/{file}"))
            .collect()
    }
}

/// Context URLs under the default base.
pub fn context_urls(sectors: &[String]) -> Vec<String> {
    ContextConfig::default().context_urls(sectors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_context_comes_first() {
        let urls = context_urls(&["battery".to_string(), "textile".to_string()]);
        assert_eq!(
            urls,
            vec![
                "https://dpp-keystone.org/spec/contexts/v1/dpp-core.context.jsonld",
                "https://dpp-keystone.org/spec/contexts/v1/dpp-battery.context.jsonld",
                "https://dpp-keystone.org/spec/contexts/v1/dpp-textile.context.jsonld",
            ]
        );
    }

    #[test]
    fn base_url_without_trailing_slash() {
        let config = ContextConfig::new("http://localhost:8080/ctx");
        assert_eq!(
            config.context_urls(&[]),
            vec!["http://localhost:8080/ctx/dpp-core.context.jsonld"]
        );
    }
}
