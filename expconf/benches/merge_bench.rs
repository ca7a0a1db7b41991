use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use expconf::normalize::strip_enforce_markers;
use expconf::{ConfigMerger, Mapping, Value, VariableSubstitutor};

/// A mapping `depth` levels deep with `width` scalar keys and one list per level.
fn nested_document(depth: usize, width: usize, marker: &str) -> Mapping {
    let mut level = Mapping::new();
    for i in 0..width {
        level.insert(format!("key{i}{marker}"), Value::Int(i as i64));
    }
    level.insert(
        "items".to_string(),
        Value::Sequence((0..width as i64).map(Value::Int).collect()),
    );
    if depth > 0 {
        level.insert(
            "child".to_string(),
            Value::Mapping(nested_document(depth - 1, width, marker)),
        );
    }
    level
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    let merger = ConfigMerger::new();

    for depth in [1usize, 4, 16] {
        let base = nested_document(depth, 16, "");
        let update = nested_document(depth, 16, "");
        group.bench_with_input(BenchmarkId::new("recursive", depth), &depth, |b, _| {
            b.iter(|| merger.merge(black_box(base.clone()), black_box(update.clone())));
        });
    }

    // Enforced keys short-circuit recursion
    let base = nested_document(8, 16, "");
    let update = nested_document(8, 16, "!");
    group.bench_function("enforced", |b| {
        b.iter(|| merger.merge(black_box(base.clone()), black_box(update.clone())));
    });

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    let marked = Value::Mapping(nested_document(8, 32, "!"));
    group.bench_function("strip_markers", |b| {
        b.iter(|| {
            let mut doc = marked.clone();
            strip_enforce_markers(black_box(&mut doc));
            doc
        });
    });

    group.finish();
}

fn bench_substitute(c: &mut Criterion) {
    let mut group = c.benchmark_group("substitute");

    let mut vars = Mapping::new();
    vars.insert("root".to_string(), Value::from("/data"));
    vars.insert("epochs".to_string(), Value::Int(10));
    let substitutor = VariableSubstitutor::new(vars);

    group.bench_function("full_token", |b| {
        b.iter(|| substitutor.substitute_str(black_box("${epochs}")));
    });

    group.bench_function("partial_tokens", |b| {
        b.iter(|| substitutor.substitute_str(black_box("${root}/runs/${epochs}/ckpt")));
    });

    group.bench_function("no_tokens", |b| {
        b.iter(|| substitutor.substitute_str(black_box("/plain/path/without/tokens")));
    });

    group.finish();
}

criterion_group!(benches, bench_merge, bench_normalize, bench_substitute);
criterion_main!(benches);
