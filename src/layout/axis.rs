use super::{AxisLayout, AxisTick};

/// Linear map from a data interval onto a pixel interval. The pixel interval
/// may run backwards, as it does for the y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f32, f32),
    pub range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    pub fn to_px(&self, value: f32) -> f32 {
        let span = self.domain.1 - self.domain.0;
        if span == 0.0 {
            return self.range.0;
        }
        let t = (f64::from(value) - f64::from(self.domain.0)) / f64::from(span);
        (f64::from(self.range.0) + t * f64::from(self.range.1 - self.range.0)) as f32
    }
}

/// Upper end of the x domain: the configured value, otherwise the largest
/// data value scaled by `headroom`. Falls back to 1 when that is not a
/// positive number.
pub(crate) fn x_domain_max(values: impl Iterator<Item = f32>, fixed: Option<f32>, headroom: f32) -> f32 {
    let max = fixed.unwrap_or_else(|| values.fold(f32::NEG_INFINITY, f32::max) * headroom);
    if max.is_finite() && max > 0.0 { max } else { 1.0 }
}

pub(crate) fn y_domain_max(fixed: Option<f32>) -> f32 {
    match fixed {
        Some(max) if max.is_finite() && max > 0.0 => max,
        _ => 1.0,
    }
}

/// A "nice" tick step (1, 2 or 5 times a power of ten) giving roughly
/// `target_steps` ticks over `range`, nudged so the tick count lands between
/// 8 and 12.
pub fn calculate_step(range: f32, target_steps: usize) -> f32 {
    let range = f64::from(range);
    if !range.is_finite() || range <= 0.0 || target_steps == 0 {
        return 1.0;
    }
    let rough = range / target_steps as f64;
    let magnitude = 10f64.powf(rough.log10().floor());
    let normalized = rough / magnitude;
    let mut step = if normalized <= 1.5 {
        1.0
    } else if normalized <= 3.0 {
        2.0
    } else {
        5.0
    };
    step *= magnitude;
    let steps = (range / step).floor();
    if steps < 8.0 {
        step /= 2.0;
    } else if steps > 12.0 {
        step *= 2.0;
    }
    step as f32
}

/// Ticks at multiples of the step from zero up to `max`, dropping any that
/// would land outside the drawable area.
pub(crate) fn build_axis(
    title: &str,
    max: f32,
    scale: &LinearScale,
    target_steps: usize,
    inside: impl Fn(f32) -> bool,
) -> AxisLayout {
    let step = calculate_step(max, target_steps);
    let count = (f64::from(max) / f64::from(step)).ceil() as usize;
    let ticks = (0..=count)
        .filter_map(|i| {
            let value = (i as f64 * f64::from(step)) as f32;
            let position = scale.to_px(value);
            inside(position).then(|| AxisTick {
                value,
                position,
                label: format!("{value:.2}"),
            })
        })
        .collect();
    AxisLayout {
        title: title.to_string(),
        min: 0.0,
        max,
        step,
        ticks,
    }
}
