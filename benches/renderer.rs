use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use scatter_rs_renderer::config::{LayoutConfig, RenderConfig};
use scatter_rs_renderer::layout::{LabelRequest, PlacementParams, Rect, Segment, compute_layout, place_labels};
use scatter_rs_renderer::parser::parse_scatter;
use scatter_rs_renderer::render::render_svg;
use scatter_rs_renderer::theme::Theme;
use std::hint::black_box;

/// Deterministic pseudo-random scatter input. `spread` shrinks the value range
/// to pack points (and their labels) closer together; every fourth point links
/// back to an earlier one.
fn scatter_source(points: usize, spread: f32) -> String {
    let mut state = 0x2545_f491_u32;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        (state % 10_000) as f32 / 10_000.0
    };
    let mut items = Vec::with_capacity(points);
    for i in 0..points {
        let x = 1.0 + next() * 100.0 * spread;
        let y = 0.05 + next() * 0.9 * spread;
        let link = if i >= 4 && i % 4 == 0 {
            format!(", \"connectedTo\": \"P{}\"", i / 2)
        } else {
            String::new()
        };
        items.push(format!(
            "{{\"name\": \"P{i}\", \"x\": {x:.3}, \"y\": {y:.3}{link}}}"
        ));
    }
    format!("[{}]", items.join(","))
}

fn datasets() -> Vec<(&'static str, String)> {
    vec![
        ("sparse_20", scatter_source(20, 1.0)),
        ("sparse_100", scatter_source(100, 1.0)),
        ("clustered_50", scatter_source(50, 0.2)),
        ("clustered_150", scatter_source(150, 0.2)),
    ]
}

fn fast_config() -> LayoutConfig {
    LayoutConfig {
        fast_text_metrics: true,
        ..LayoutConfig::default()
    }
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (name, input) in datasets() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, data| {
            b.iter(|| {
                let plot = parse_scatter(black_box(data)).expect("parse failed");
                black_box(plot.points.len());
            });
        });
    }
    group.finish();
}

fn bench_place_labels(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_labels");
    let bounds = Rect::new(50.0, 50.0, 700.0, 500.0);
    let params = PlacementParams::default();
    for count in [25usize, 100, 250] {
        let requests: Vec<LabelRequest> = (0..count)
            .map(|i| LabelRequest {
                anchor: (
                    60.0 + (i * 97 % 680) as f32,
                    60.0 + (i * 61 % 480) as f32,
                ),
                width: 40.0,
                height: 24.0,
            })
            .collect();
        let segments: Vec<Segment> = requests
            .windows(2)
            .step_by(5)
            .map(|pair| Segment::new(pair[0].anchor, pair[1].anchor))
            .collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(count),
            &(requests, segments),
            |b, (requests, segments)| {
                b.iter(|| {
                    let result = place_labels(black_box(requests), segments, bounds, &params);
                    black_box(result.relaxation.iterations);
                });
            },
        );
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let theme = Theme::classic();
    let config = fast_config();
    let render = RenderConfig::default();
    for (name, input) in datasets() {
        let plot = parse_scatter(&input).expect("parse failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &plot, |b, plot| {
            b.iter(|| {
                let layout = compute_layout(black_box(plot), &theme, &config, &render);
                black_box(layout.labels.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let theme = Theme::classic();
    let config = fast_config();
    let render = RenderConfig::default();
    for (name, input) in datasets() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, data| {
            b.iter(|| {
                let plot = parse_scatter(black_box(data)).expect("parse failed");
                let layout = compute_layout(&plot, &theme, &config, &render);
                let svg = render_svg(&layout, &theme, &config);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_parse, bench_place_labels, bench_layout, bench_end_to_end
);
criterion_main!(benches);
