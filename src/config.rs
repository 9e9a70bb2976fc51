use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Space between the canvas edge and the drawable area, on every side.
    pub margin: f32,
    pub label_gap: f32,
    pub point_radius: f32,
    /// Padding around the measured text inside a label box.
    pub label_padding: f32,
    pub compass_offset: f32,
    pub spiral_start_radius: f32,
    pub spiral_radius_step: f32,
    pub spiral_max_radius: f32,
    pub spiral_angle_step_deg: f32,
    pub relax_max_iterations: usize,
    pub relax_step: f32,
    /// Fixed upper end of the x axis; derived from the data when unset.
    pub x_max: Option<f32>,
    /// Multiplier applied to the largest x value when `x_max` is unset.
    pub x_headroom: f32,
    pub y_max: Option<f32>,
    pub target_tick_steps: usize,
    /// Skip font lookup and size labels from a per-character estimate.
    pub fast_text_metrics: bool,
    pub char_width_factor: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: 50.0,
            label_gap: 10.0,
            point_radius: 4.0,
            label_padding: 5.0,
            compass_offset: 15.0,
            spiral_start_radius: 15.0,
            spiral_radius_step: 5.0,
            spiral_max_radius: 100.0,
            spiral_angle_step_deg: 15.0,
            relax_max_iterations: 100,
            relax_step: 2.0,
            x_max: None,
            x_headroom: 1.1,
            y_max: None,
            target_tick_steps: 10,
            fast_text_metrics: false,
            char_width_factor: 0.56,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::classic();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<NumberOrString>,
    tick_font_size: Option<NumberOrString>,
    text_color: Option<String>,
    axis_color: Option<String>,
    grid_color: Option<String>,
    background: Option<String>,
    tooltip_background: Option<String>,
    tooltip_text_color: Option<String>,
    fallback_point_color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f32),
    String(String),
}

impl NumberOrString {
    /// Accepts `12`, `"12"` and `"12px"`.
    fn as_f32(&self) -> Option<f32> {
        match self {
            NumberOrString::Number(val) => Some(*val),
            NumberOrString::String(val) => {
                let trimmed = val.trim();
                trimmed
                    .strip_suffix("px")
                    .unwrap_or(trimmed)
                    .trim()
                    .parse::<f32>()
                    .ok()
            }
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ScatterConfigFile {
    margin: Option<f32>,
    label_gap: Option<f32>,
    point_radius: Option<f32>,
    label_padding: Option<f32>,
    compass_offset: Option<f32>,
    spiral_start_radius: Option<f32>,
    spiral_radius_step: Option<f32>,
    spiral_max_radius: Option<f32>,
    spiral_angle_step: Option<f32>,
    max_iterations: Option<usize>,
    relax_step: Option<f32>,
    x_max: Option<f32>,
    x_headroom: Option<f32>,
    y_max: Option<f32>,
    target_tick_steps: Option<usize>,
    fast_text_metrics: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    scatter: Option<ScatterConfigFile>,
    width: Option<f32>,
    height: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Build a config from JSON text. Unknown keys are ignored; every key that
/// is present overrides the matching default.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "dark" {
            config.theme = Theme::dark();
        } else if theme_name == "default" || theme_name == "classic" {
            config.theme = Theme::classic();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size.as_ref().and_then(NumberOrString::as_f32) {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.tick_font_size.as_ref().and_then(NumberOrString::as_f32) {
            config.theme.tick_font_size = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.axis_color {
            config.theme.axis_color = v;
        }
        if let Some(v) = vars.grid_color {
            config.theme.grid_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.tooltip_background {
            config.theme.tooltip_background = v;
        }
        if let Some(v) = vars.tooltip_text_color {
            config.theme.tooltip_text_color = v;
        }
        if let Some(v) = vars.fallback_point_color {
            config.theme.fallback_point_color = v;
        }
    }

    if let Some(scatter) = parsed.scatter {
        let layout = &mut config.layout;
        if let Some(v) = scatter.margin {
            layout.margin = v;
        }
        if let Some(v) = scatter.label_gap {
            layout.label_gap = v;
        }
        if let Some(v) = scatter.point_radius {
            layout.point_radius = v;
        }
        if let Some(v) = scatter.label_padding {
            layout.label_padding = v;
        }
        if let Some(v) = scatter.compass_offset {
            layout.compass_offset = v;
        }
        if let Some(v) = scatter.spiral_start_radius {
            layout.spiral_start_radius = v;
        }
        if let Some(v) = scatter.spiral_radius_step {
            layout.spiral_radius_step = v;
        }
        if let Some(v) = scatter.spiral_max_radius {
            layout.spiral_max_radius = v;
        }
        if let Some(v) = scatter.spiral_angle_step {
            layout.spiral_angle_step_deg = v;
        }
        if let Some(v) = scatter.max_iterations {
            layout.relax_max_iterations = v;
        }
        if let Some(v) = scatter.relax_step {
            layout.relax_step = v;
        }
        if scatter.x_max.is_some() {
            layout.x_max = scatter.x_max;
        }
        if let Some(v) = scatter.x_headroom {
            layout.x_headroom = v;
        }
        if scatter.y_max.is_some() {
            layout.y_max = scatter.y_max;
        }
        if let Some(v) = scatter.target_tick_steps {
            layout.target_tick_steps = v;
        }
        if let Some(v) = scatter.fast_text_metrics {
            layout.fast_text_metrics = v;
        }
    }

    if let Some(v) = parsed.width {
        config.render.width = v;
    }
    if let Some(v) = parsed.height {
        config.render.height = v;
    }
    config.render.background = config.theme.background.clone();

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_gives_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.render.width, 800.0);
        assert_eq!(config.render.height, 600.0);
        assert_eq!(config.layout.margin, 50.0);
        assert_eq!(config.theme.font_family, "Arial");
    }

    #[test]
    fn scatter_overrides_apply() {
        let config = parse_config(
            r#"{
                "width": 1024,
                "scatter": { "labelGap": 6, "maxIterations": 20, "yMax": 2.5 },
                "unknownKey": true
            }"#,
        )
        .unwrap();
        assert_eq!(config.render.width, 1024.0);
        assert_eq!(config.render.height, 600.0);
        assert_eq!(config.layout.label_gap, 6.0);
        assert_eq!(config.layout.relax_max_iterations, 20);
        assert_eq!(config.layout.y_max, Some(2.5));
        assert_eq!(config.layout.x_max, None);
    }

    #[test]
    fn theme_variables_accept_px_strings() {
        let config = parse_config(
            r##"{ "theme": "dark", "themeVariables": { "fontSize": "14px", "background": "#000" } }"##,
        )
        .unwrap();
        assert_eq!(config.theme.font_size, 14.0);
        assert_eq!(config.render.background, "#000");
        assert_eq!(config.theme.grid_color, Theme::dark().grid_color);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(parse_config("{ not json").is_err());
        assert!(load_config(Some(Path::new("/nonexistent/scatter-config.json"))).is_err());
    }
}
