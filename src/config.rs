use anyhow::{Context, Result};
use serde::Deserialize;

use crate::highlight::TieBreak;
use crate::scroll_top::ScrollTopConfig;
use crate::visibility::TrackerOptions;

pub const CONFIG_ELEMENT_ID: &str = "portfolio-config";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FeatureFlags {
    pub typing_animation: bool,
    pub theme_toggle: bool,
    pub scroll_progress: bool,
    pub skip_link: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            typing_animation: false,
            theme_toggle: false,
            scroll_progress: false,
            skip_link: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct InteractivityConfig {
    pub features: FeatureFlags,
    pub reveal: TrackerOptions,
    pub sections: TrackerOptions,
    pub tie_break: TieBreak,
    pub scroll_top: ScrollTopConfig,
    pub skip_target: String,
}

impl Default for InteractivityConfig {
    fn default() -> Self {
        Self {
            features: FeatureFlags::default(),
            reveal: TrackerOptions::reveal(),
            sections: TrackerOptions::sections(),
            tie_break: TieBreak::default(),
            scroll_top: ScrollTopConfig::default(),
            skip_target: "#projects".to_string(),
        }
    }
}

pub fn parse_config(raw: &str) -> Result<InteractivityConfig> {
    let mut config: InteractivityConfig =
        serde_json::from_str(raw).context("config decode failed")?;
    config.reveal = config.reveal.clamped();
    config.sections = config.sections.clamped();
    Ok(config)
}

pub fn load_config() -> InteractivityConfig {
    match read_config_source() {
        Some(raw) => parse_config(&raw).unwrap_or_else(|err| {
            tracing::warn!("config: {err:#}, using defaults");
            InteractivityConfig::default()
        }),
        None => InteractivityConfig::default(),
    }
}

#[cfg(target_arch = "wasm32")]
fn read_config_source() -> Option<String> {
    let document = web_sys::window().and_then(|window| window.document())?;
    let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
    element
        .text_content()
        .filter(|text| !text.trim().is_empty())
}

#[cfg(not(target_arch = "wasm32"))]
fn read_config_source() -> Option<String> {
    let raw = std::env::var("PORTFOLIO_CONFIG").ok();
    let overrides = [
        ("PORTFOLIO_TYPING_ANIMATION", "typing-animation"),
        ("PORTFOLIO_THEME_TOGGLE", "theme-toggle"),
        ("PORTFOLIO_SCROLL_PROGRESS", "scroll-progress"),
        ("PORTFOLIO_SKIP_LINK", "skip-link"),
    ];
    let flags: serde_json::Map<String, serde_json::Value> = overrides
        .iter()
        .filter_map(|(var, key)| {
            let value = std::env::var(var).ok()?;
            Some((key.to_string(), serde_json::Value::Bool(parse_flag(&value))))
        })
        .collect();
    if flags.is_empty() {
        return raw;
    }
    let mut document = raw
        .and_then(|text| serde_json::from_str::<serde_json::Value>(&text).ok())
        .filter(|value| value.is_object())
        .unwrap_or_else(|| serde_json::Value::Object(Default::default()));
    if let Some(root) = document.as_object_mut() {
        let features = root
            .entry("features")
            .or_insert_with(|| serde_json::Value::Object(Default::default()));
        if let Some(features) = features.as_object_mut() {
            features.extend(flags);
        }
    }
    Some(document.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::visibility::{MarginLength, RootMargin};

    #[test]
    fn empty_object_yields_defaults() {
        assert_eq!(parse_config("{}").unwrap(), InteractivityConfig::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = parse_config(
            r##"{
                "features": { "theme-toggle": true },
                "sections": { "threshold": 0.5, "root-margin": "-10px 0px" },
                "tie-break": "document-order",
                "scroll-top": { "threshold": 600 }
            }"##,
        )
        .unwrap();

        assert!(config.features.theme_toggle);
        assert!(config.features.skip_link);
        assert!(!config.features.typing_animation);
        assert_eq!(config.sections.threshold, 0.5);
        assert_eq!(
            config.sections.root_margin,
            RootMargin {
                top: MarginLength::px(-10.0),
                right: MarginLength::px(0.0),
                bottom: MarginLength::px(-10.0),
                left: MarginLength::px(0.0)
            }
        );
        assert_eq!(config.reveal, TrackerOptions::reveal());
        assert_eq!(config.tie_break, TieBreak::DocumentOrder);
        assert_eq!(config.scroll_top.threshold, 600.0);
        assert_eq!(config.scroll_top.hide_delay_ms, 300);
        assert_eq!(config.skip_target, "#projects");
    }

    #[test]
    fn out_of_range_threshold_is_clamped() {
        let config = parse_config(r#"{ "reveal": { "threshold": 4.0 } }"#).unwrap();
        assert_eq!(config.reveal.threshold, 1.0);
    }

    #[test]
    fn percentage_root_margin_keeps_the_rest_of_the_config() {
        let config = parse_config(
            r#"{ "features": { "theme-toggle": true }, "reveal": { "threshold": 0.1, "root-margin": "0px 0px -10% 0px" } }"#,
        )
        .unwrap();

        assert!(config.features.theme_toggle);
        assert_eq!(config.reveal.root_margin.bottom, MarginLength::percent(-10.0));
        assert_eq!(config.reveal.root_margin.to_css(), "0px 0px -10% 0px");
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(parse_config("{ features: ").is_err());
        assert!(parse_config(r#"{ "sections": { "root-margin": "1px 2px 3px 4px 5px", "threshold": 0.3 } }"#).is_err());
    }

    #[test]
    fn flag_spellings() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" ON "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("nope"));
    }
}
