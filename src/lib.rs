#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod log;
pub mod parser;
pub mod render;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use ir::{Point, ScatterPlot};
pub use layout::{Layout, PlacementParams, compute_layout, place_labels};
pub use parser::{ParseError, parse_scatter};
pub use render::render_svg;
pub use theme::Theme;

/// Everything needed to turn scatter input into SVG.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl RenderOptions {
    pub fn classic() -> Self {
        Config::default().into()
    }

    pub fn dark() -> Self {
        let theme = Theme::dark();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..RenderConfig::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.render.width = width;
        self.render.height = height;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::classic()
    }
}

impl From<Config> for RenderOptions {
    fn from(config: Config) -> Self {
        Self {
            theme: config.theme,
            layout: config.layout,
            render: config.render,
        }
    }
}

/// Render JSON/JSON5 scatter input to SVG with default options.
pub fn render(input: &str) -> anyhow::Result<String> {
    render_with_options(input, RenderOptions::default())
}

pub fn render_with_options(input: &str, options: RenderOptions) -> anyhow::Result<String> {
    let plot = parse_scatter(input)?;
    let layout = compute_layout(&plot, &options.theme, &options.layout, &options.render);
    Ok(render_svg(&layout, &options.theme, &options.layout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_smoke() {
        let svg = render(r#"[{ name: "a", x: 1, y: 0.5 }]"#).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("point-a"));
    }

    #[test]
    fn render_rejects_bad_input() {
        assert!(render("not data").is_err());
    }

    #[test]
    fn options_carry_canvas_size() {
        let options = RenderOptions::dark().with_size(400.0, 300.0);
        let svg = render_with_options("[]", options).unwrap();
        assert!(svg.contains("viewBox=\"0 0 400 300\""));
    }
}
