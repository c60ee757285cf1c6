//! Criterion benchmark for the codepoint assignment loop (made by FontLab https://www.fontlab.com/)

use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use typicon_core::codepoints::{CodepointMap, CollisionPolicy, DEFAULT_BASE};
use typicon_core::discovery::IconSource;

fn sample_icons(count: usize) -> Vec<IconSource> {
    let categories = ["brands", "purcats", "regular", "solid"];
    (0..count)
        .map(|i| {
            let category = categories[i * categories.len() / count];
            let identifier = format!("icon-{i:05}");
            IconSource {
                category: category.to_string(),
                path: PathBuf::from(format!("icons/SVG/{category}/{identifier}.svg")),
                relative: format!("{category}/{identifier}.svg"),
                identifier,
            }
        })
        .collect()
}

fn bench_assignment(c: &mut Criterion) {
    let icons = sample_icons(5_000);

    c.bench_function("from_icons 5k reject", |b| {
        b.iter(|| {
            CodepointMap::from_icons(black_box(&icons), DEFAULT_BASE, CollisionPolicy::Reject)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_assignment);
criterion_main!(benches);
