use crate::config::LayoutConfig;
use crate::text_metrics;
use crate::theme::Theme;

use super::TextBlock;

/// Line box height relative to the font size when no font file is available.
const FALLBACK_LINE_HEIGHT: f32 = 1.15;

/// Label text extent. The label box drawn around it adds
/// `config.label_padding` on every side.
pub(super) fn measure_label(text: &str, theme: &Theme, config: &LayoutConfig) -> TextBlock {
    let font_size = theme.font_size;
    let family = theme.font_family.as_str();
    let width = text_width(text, font_size, family, config);
    let height = if config.fast_text_metrics {
        font_size * FALLBACK_LINE_HEIGHT
    } else {
        text_metrics::line_height(font_size, family).unwrap_or(font_size * FALLBACK_LINE_HEIGHT)
    };
    TextBlock {
        text: text.to_string(),
        width,
        height,
    }
}

pub(super) fn text_width(text: &str, font_size: f32, font_family: &str, config: &LayoutConfig) -> f32 {
    if config.fast_text_metrics && text.is_ascii() {
        return fallback_text_width(text, font_size, config.char_width_factor);
    }
    text_metrics::measure_text_width(text, font_size, font_family)
        .unwrap_or_else(|| fallback_text_width(text, font_size, config.char_width_factor))
}

fn fallback_text_width(text: &str, font_size: f32, average: f32) -> f32 {
    text.chars().map(|ch| char_width_factor(ch, average)).sum::<f32>() * font_size
}

/// Rough advance of `ch` in ems for a proportional sans-serif face.
fn char_width_factor(ch: char, average: f32) -> f32 {
    match ch {
        'i' | 'j' | 'l' | 'I' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' => 0.26,
        ' ' | 'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '-' => 0.33,
        'm' | 'w' | 'M' | 'W' | '@' | '%' => 0.86,
        'A'..='Z' => 0.68,
        '0'..='9' => 0.56,
        c if c.is_ascii() => average,
        // CJK and other wide scripts.
        c if (c as u32) >= 0x2E80 => 1.0,
        _ => average,
    }
}
