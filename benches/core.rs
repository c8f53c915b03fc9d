use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use sleek_utils::{convert_case, optimal_col_count, reading_time, CaseStyle, TemplateEngine};

fn benchmark_optimal_col_count(c: &mut Criterion) {
    c.bench_function("optimal_col_count", |b| {
        b.iter(|| {
            for items in 1..200 {
                let cols = optimal_col_count(black_box(items), black_box(6));
                let _ = black_box(cols);
            }
        })
    });
}

fn benchmark_convert_case(c: &mut Criterion) {
    let inputs = ["my_post_type", "HTTPServerError", "book review", "categories"];

    for style in [CaseStyle::Pascal, CaseStyle::Snake, CaseStyle::Plural] {
        c.bench_function(&format!("convert_case/{}", style), |b| {
            b.iter(|| {
                for input in inputs {
                    black_box(convert_case(black_box(input), style));
                }
            })
        });
    }
}

fn benchmark_reading_time(c: &mut Criterion) {
    let content = "<p>The quick brown fox jumps over the lazy dog.</p>".repeat(200);

    c.bench_function("reading_time", |b| {
        b.iter(|| {
            let _ = black_box(reading_time(black_box(&content), 200));
        })
    });
}

fn benchmark_template_render(c: &mut Criterion) {
    let engine = TemplateEngine::new();
    let template = r#"<article class="@{type | convert_case:"kebab"}"><h2>@{title}</h2>@{!body}<p>@{tags | implode_and}</p></article>"#;
    let data = json!({
        "type": "BookReview",
        "title": "Dune & friends",
        "body": "<p>Spice.</p>",
        "tags": ["sci-fi", "classic", "desert"],
    });

    c.bench_function("template_render", |b| {
        b.iter(|| {
            let _ = black_box(engine.render(black_box(template), &data));
        })
    });
}

criterion_group!(
    benches,
    benchmark_optimal_col_count,
    benchmark_convert_case,
    benchmark_reading_time,
    benchmark_template_render
);
criterion_main!(benches);
