use crate::config::{LayoutConfig, RenderConfig};
use crate::layout::{AxisLayout, Layout, PlacedLabel, PointLayout};
use crate::theme::Theme;
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static MARKER_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_-]").unwrap());

/// Offset of tick labels from their axis.
const TICK_LABEL_OFFSET: f32 = 15.0;
/// Offset of the x axis title below the axis line.
const AXIS_TITLE_OFFSET: f32 = 30.0;
const TOOLTIP_PADDING: f32 = 5.0;

pub fn render_svg(layout: &Layout, theme: &Theme, config: &LayoutConfig) -> String {
    let mut svg = String::new();
    let (width, height) = (layout.width, layout.height);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&hover_style(config));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        escape_xml(&theme.background)
    ));

    svg.push_str("<defs>");
    let mut marker_colors: Vec<&str> = Vec::new();
    for connector in &layout.connectors {
        if !marker_colors.contains(&connector.color.as_str()) {
            marker_colors.push(&connector.color);
        }
    }
    for color in &marker_colors {
        svg.push_str(&format!(
            "<marker id=\"{}\" markerWidth=\"10\" markerHeight=\"10\" refX=\"9\" refY=\"3\" orient=\"auto\" markerUnits=\"strokeWidth\"><path d=\"M0,0 L0,6 L9,3 z\" fill=\"{}\"/></marker>",
            marker_id(color),
            escape_xml(color)
        ));
    }
    svg.push_str("</defs>");

    render_axes(&mut svg, layout, theme);

    for connector in &layout.connectors {
        let (x1, y1) = connector.segment.start;
        let (x2, y2) = connector.segment.end;
        svg.push_str(&format!(
            "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{}\" stroke-width=\"2\" marker-end=\"url(#{})\"/>",
            escape_xml(&connector.color),
            marker_id(&connector.color)
        ));
    }

    for label in &layout.labels {
        if let Some(point) = layout.points.get(label.index) {
            render_point_group(&mut svg, point, label, theme, config);
        }
    }

    svg.push_str("</svg>");
    svg
}

/// Hover highlight: the point grows by half, the label border thickens and
/// the tooltip card shows.
fn hover_style(config: &LayoutConfig) -> String {
    format!(
        "<style>.point .point-dot{{transition:r 0.1s}}.point:hover .point-dot{{r:{:.2}px}}.point:hover .label-box{{stroke-width:2}}.point .tooltip{{visibility:hidden;pointer-events:none}}.point:hover .tooltip{{visibility:visible}}</style>",
        config.point_radius * 1.5
    )
}

fn render_axes(svg: &mut String, layout: &Layout, theme: &Theme) {
    let m = layout.margin;
    let (w, h) = (layout.width, layout.height);

    svg.push_str(&format!(
        "<line x1=\"{m}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\"/>",
        h - m,
        w - m,
        h - m,
        escape_xml(&theme.axis_color)
    ));
    svg.push_str(&format!(
        "<line x1=\"{m}\" y1=\"{m}\" x2=\"{m}\" y2=\"{}\" stroke=\"{}\"/>",
        h - m,
        escape_xml(&theme.axis_color)
    ));

    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        w / 2.0,
        h - m + AXIS_TITLE_OFFSET,
        escape_xml(&theme.font_family),
        theme.font_size,
        escape_xml(&theme.text_color),
        escape_xml(&layout.x_axis.title)
    ));
    let (tx, ty) = (m / 2.0, h / 2.0);
    svg.push_str(&format!(
        "<text x=\"{tx:.2}\" y=\"{ty:.2}\" text-anchor=\"middle\" transform=\"rotate(-90, {tx:.2}, {ty:.2})\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        escape_xml(&theme.font_family),
        theme.font_size,
        escape_xml(&theme.text_color),
        escape_xml(&layout.y_axis.title)
    ));

    render_x_ticks(svg, &layout.x_axis, layout, theme);
    render_y_ticks(svg, &layout.y_axis, layout, theme);
}

fn render_x_ticks(svg: &mut String, axis: &AxisLayout, layout: &Layout, theme: &Theme) {
    let m = layout.margin;
    let bottom = layout.height - m;
    for tick in &axis.ticks {
        let x = tick.position;
        svg.push_str(&format!(
            "<line x1=\"{x:.2}\" y1=\"{m}\" x2=\"{x:.2}\" y2=\"{bottom}\" stroke=\"{}\" stroke-dasharray=\"5,5\"/>",
            escape_xml(&theme.grid_color)
        ));
        svg.push_str(&format!(
            "<text x=\"{x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}px\" fill=\"{}\">{}</text>",
            bottom + TICK_LABEL_OFFSET,
            escape_xml(&theme.font_family),
            theme.tick_font_size,
            escape_xml(&theme.text_color),
            tick.label
        ));
    }
}

fn render_y_ticks(svg: &mut String, axis: &AxisLayout, layout: &Layout, theme: &Theme) {
    let m = layout.margin;
    let right = layout.width - m;
    for tick in &axis.ticks {
        let y = tick.position;
        svg.push_str(&format!(
            "<line x1=\"{m}\" y1=\"{y:.2}\" x2=\"{right}\" y2=\"{y:.2}\" stroke=\"{}\" stroke-dasharray=\"5,5\"/>",
            escape_xml(&theme.grid_color)
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" font-family=\"{}\" font-size=\"{}px\" fill=\"{}\">{}</text>",
            m - 10.0,
            y + 3.0,
            escape_xml(&theme.font_family),
            theme.tick_font_size,
            escape_xml(&theme.text_color),
            tick.label
        ));
    }
}

fn render_point_group(
    svg: &mut String,
    point: &PointLayout,
    label: &PlacedLabel,
    theme: &Theme,
    config: &LayoutConfig,
) {
    let color = escape_xml(&point.color);
    let (px, py) = point.anchor;
    let (lx, ly) = label.leader_end;
    let rect = label.rect;

    svg.push_str(&format!(
        "<g class=\"point point-{}\">",
        escape_xml(&css_class_name(&point.name))
    ));
    svg.push_str(&format!("<title>{}</title>", escape_xml(&point.tooltip.text)));
    svg.push_str(&format!(
        "<line x1=\"{px:.2}\" y1=\"{py:.2}\" x2=\"{lx:.2}\" y2=\"{ly:.2}\" stroke=\"{color}\" stroke-width=\"1\"/>"
    ));
    svg.push_str(&format!(
        "<circle class=\"point-dot\" cx=\"{px:.2}\" cy=\"{py:.2}\" r=\"{}\" fill=\"{color}\"/>",
        config.point_radius
    ));
    svg.push_str(&format!(
        "<rect class=\"label-box\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"3\" ry=\"3\" fill=\"none\" stroke=\"{color}\" stroke-width=\"1\"/>",
        rect.x, rect.y, rect.width, rect.height
    ));
    let (cx, cy) = rect.center();
    svg.push_str(&format!(
        "<text x=\"{cx:.2}\" y=\"{cy:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}px\" fill=\"{color}\">{}</text>",
        escape_xml(&theme.font_family),
        theme.font_size,
        escape_xml(&point.label.text)
    ));
    render_tooltip(svg, point, theme);
    svg.push_str("</g>");
}

/// Hover card above and to the right of the point, hidden until the group is
/// hovered.
fn render_tooltip(svg: &mut String, point: &PointLayout, theme: &Theme) {
    let (px, py) = point.anchor;
    let block = &point.tooltip;
    svg.push_str("<g class=\"tooltip\">");
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"3\" ry=\"3\" fill=\"{}\" opacity=\"0.8\"/>",
        px + 5.0,
        py - block.height - TOOLTIP_PADDING / 2.0,
        block.width + TOOLTIP_PADDING * 2.0,
        block.height + TOOLTIP_PADDING,
        escape_xml(&theme.tooltip_background)
    ));
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"start\" font-family=\"{}\" font-size=\"{}px\" fill=\"{}\">{}</text>",
        px + 10.0,
        py - 5.0,
        escape_xml(&theme.font_family),
        theme.font_size,
        escape_xml(&theme.tooltip_text_color),
        escape_xml(&block.text)
    ));
    svg.push_str("</g>");
}

/// `point-<name>` class suffix: whitespace runs become a single dash.
pub fn css_class_name(name: &str) -> String {
    WHITESPACE_RE.replace_all(name.trim(), "-").into_owned()
}

fn marker_id(color: &str) -> String {
    format!("arrow-{}", MARKER_ID_RE.replace_all(color, ""))
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Arial".to_string();
    opt.fontdb_mut().load_system_fonts();
    if let Some(size) = usvg::Size::from_wh(render_cfg.width, render_cfg.height) {
        opt.default_size = size;
    }

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    anyhow::bail!("PNG output requires the `png` feature")
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::{Point, ScatterPlot};
    use crate::layout::compute_layout;

    fn render_plot(plot: &ScatterPlot) -> String {
        let theme = Theme::classic();
        let config = LayoutConfig {
            fast_text_metrics: true,
            ..LayoutConfig::default()
        };
        let layout = compute_layout(plot, &theme, &config, &RenderConfig::default());
        render_svg(&layout, &theme, &config)
    }

    #[test]
    fn render_svg_basic() {
        let plot = ScatterPlot::new(vec![
            Point::new("Alpha", 1.0, 0.2),
            Point::connected("Beta", 2.0, 0.6, "Alpha"),
        ]);
        let svg = render_plot(&plot);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Alpha"));
        assert!(svg.contains("class=\"point point-Beta\""));
        assert!(svg.contains("<title>Alpha: (1.000, 0.200)</title>"));
        assert!(svg.contains("marker-end=\"url(#arrow-"));
        assert!(svg.contains("stroke-dasharray=\"5,5\""));
    }

    #[test]
    fn one_marker_per_connector_color() {
        let plot = ScatterPlot::new(vec![
            Point::new("a", 1.0, 0.2),
            Point::connected("b", 2.0, 0.4, "a"),
            Point::connected("c", 3.0, 0.6, "a"),
        ]);
        let svg = render_plot(&plot);
        assert_eq!(svg.matches("<marker ").count(), 1);
        assert_eq!(svg.matches("marker-end=").count(), 2);
    }

    #[test]
    fn names_are_escaped() {
        let plot = ScatterPlot::new(vec![Point::new("a < b & c", 1.0, 0.5)]);
        let svg = render_plot(&plot);
        assert!(svg.contains("a &lt; b &amp; c"));
        assert!(!svg.contains("a < b"));
    }

    #[test]
    fn tooltip_card_uses_theme_colors() {
        let mut theme = Theme::classic();
        theme.tooltip_background = "#123456".to_string();
        theme.tooltip_text_color = "#ABCDEF".to_string();
        let config = LayoutConfig {
            fast_text_metrics: true,
            ..LayoutConfig::default()
        };
        let plot = ScatterPlot::new(vec![Point::new("Alpha", 1.0, 0.2)]);
        let layout = compute_layout(&plot, &theme, &config, &RenderConfig::default());
        let svg = render_svg(&layout, &theme, &config);

        assert!(svg.contains("<g class=\"tooltip\">"));
        assert!(svg.contains("fill=\"#123456\" opacity=\"0.8\""));
        assert!(svg.contains("fill=\"#ABCDEF\">Alpha: (1.000, 0.200)</text>"));
        assert!(svg.contains(".point:hover .tooltip{visibility:visible}"));
    }

    #[test]
    fn font_family_is_escaped() {
        let mut theme = Theme::classic();
        theme.font_family = "\"Fira Sans\", sans-serif".to_string();
        let config = LayoutConfig {
            fast_text_metrics: true,
            ..LayoutConfig::default()
        };
        let plot = ScatterPlot::new(vec![Point::new("a", 1.0, 0.5)]);
        let layout = compute_layout(&plot, &theme, &config, &RenderConfig::default());
        let svg = render_svg(&layout, &theme, &config);

        assert!(svg.contains("font-family=\"&quot;Fira Sans&quot;, sans-serif\""));
        assert!(!svg.contains("font-family=\"\"Fira"));
    }

    #[test]
    fn css_class_collapses_whitespace() {
        assert_eq!(css_class_name("New  York\tCity"), "New-York-City");
        assert_eq!(css_class_name("solo"), "solo");
    }
}
