//! Configuration types for scene rendering.
//!
//! All types implement [`serde::Deserialize`] with defaults on every field,
//! so a partial TOML or JSON document is enough to override one setting.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and style settings.
//! - [`RenderConfig`] - Containment corridors, canvas margin, marker sizes.
//! - [`StyleConfig`] - Background color and default boundary radius.
//!
//! # Example
//!
//! ```
//! # use enclave::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.render().corridors());
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use enclave_core::color::Color;

use crate::EnclaveError;

/// Top-level configuration combining render and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its two sections.
    pub fn new(render: RenderConfig, style: StyleConfig) -> Self {
        Self { render, style }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks values that deserialization alone cannot reject.
    ///
    /// # Errors
    ///
    /// Returns [`EnclaveError::Config`] for an unparsable background color or
    /// a negative size setting.
    pub fn validate(&self) -> Result<(), EnclaveError> {
        self.style.background_color()?;

        let render = &self.render;
        for (name, value) in [
            ("corridor_width", render.corridor_width),
            ("canvas_margin", render.canvas_margin),
            ("port_radius", render.port_radius),
            ("flow_radius", render.flow_radius),
            ("border_radius", self.style.border_radius),
        ] {
            if value < 0.0 {
                return Err(EnclaveError::Config(format!(
                    "`{name}` must not be negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Settings for the containment and paint stages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Vertical padding added to corridor regions.
    corridor_width: f32,

    /// Space around the content extent when the scene has no explicit size.
    canvas_margin: f32,

    /// Whether cross-boundary connectors widen clip/mask regions.
    corridors: bool,

    port_radius: f32,

    flow_radius: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            corridor_width: 16.0,
            canvas_margin: 20.0,
            corridors: true,
            port_radius: 4.0,
            flow_radius: 5.0,
        }
    }
}

impl RenderConfig {
    pub fn corridor_width(&self) -> f32 {
        self.corridor_width
    }

    pub fn canvas_margin(&self) -> f32 {
        self.canvas_margin
    }

    pub fn corridors(&self) -> bool {
        self.corridors
    }

    pub fn port_radius(&self) -> f32 {
        self.port_radius
    }

    pub fn flow_radius(&self) -> f32 {
        self.flow_radius
    }

    /// Sets the corridor padding.
    pub fn with_corridor_width(mut self, width: f32) -> Self {
        self.corridor_width = width;
        self
    }

    /// Enables or disables corridor regions.
    pub fn with_corridors(mut self, enabled: bool) -> Self {
        self.corridors = enabled;
        self
    }

    /// Sets the canvas margin.
    pub fn with_canvas_margin(mut self, margin: f32) -> Self {
        self.canvas_margin = margin;
        self
    }
}

/// Visual styling configuration for rendered scenes.
///
/// A scene's own `background` takes precedence over the configured color.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Default background color, as a CSS color string.
    background_color: Option<String>,

    /// Corner radius for boundaries that declare none.
    border_radius: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            border_radius: 8.0,
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns [`EnclaveError::Config`] if the configured string is not a
    /// valid CSS color.
    pub fn background_color(&self) -> Result<Option<Color>, EnclaveError> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(|err| EnclaveError::Config(format!("invalid background color in config: {err}")))
    }

    pub fn border_radius(&self) -> f32 {
        self.border_radius
    }

    /// Sets the default background color.
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Sets the default boundary corner radius.
    pub fn with_border_radius(mut self, radius: f32) -> Self {
        self.border_radius = radius;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.render().corridor_width(), 16.0);
        assert_eq!(config.render().canvas_margin(), 20.0);
        assert!(config.render().corridors());
        assert_eq!(config.style().border_radius(), 8.0);
        assert!(config.style().background_color().unwrap().is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "render": { "corridors": false } }"#).unwrap();
        assert!(!config.render().corridors());
        assert_eq!(config.render().port_radius(), 4.0);
        assert_eq!(config.style().border_radius(), 8.0);
    }

    #[test]
    fn test_invalid_background_fails_validation() {
        let config = AppConfig::new(
            RenderConfig::default(),
            StyleConfig::default().with_background_color("nope"),
        );
        let err = config.validate().unwrap_err();
        assert!(matches!(err, EnclaveError::Config(_)));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_negative_setting_fails_validation() {
        let config = AppConfig::new(
            RenderConfig::default().with_corridor_width(-1.0),
            StyleConfig::default(),
        );
        assert!(config.validate().is_err());
    }
}
