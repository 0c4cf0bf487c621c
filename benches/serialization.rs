use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_dcf::{from_str, parse, to_string, Section};

#[derive(Serialize, Deserialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Clone)]
struct Catalog {
    products: Vec<Product>,
}

const COMMENTED: &str = r#"
// Service configuration
{
    // Where to listen
    host: "0.0.0.0",
    port: 0x1F90,
    /* retry policy,
       tuned for flaky links */
    retry: {
        attempts: 5,
        backoff: [0.25, 0.5, 1.0, 2.0],
        jitter: true
    },
    features: ["metrics", "tracing", "compression"],
    home: @env("HOME")
}
"#;

fn user() -> User {
    User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    }
}

fn catalog(size: u32) -> Catalog {
    Catalog {
        products: (0..size)
            .map(|i| Product {
                sku: format!("SKU{}", i),
                name: format!("Product {}", i),
                price: 9.99 + f64::from(i),
                quantity: i,
            })
            .collect(),
    }
}

fn benchmark_parse_commented(c: &mut Criterion) {
    c.bench_function("parse_commented_document", |b| {
        b.iter(|| parse(black_box(COMMENTED)))
    });
}

fn benchmark_render_commented(c: &mut Criterion) {
    let section: Section = parse(COMMENTED).unwrap();

    c.bench_function("render_commented_document", |b| {
        b.iter(|| black_box(&section).to_string())
    });
}

fn benchmark_serialize_simple(c: &mut Criterion) {
    let user = user();

    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn benchmark_deserialize_simple(c: &mut Criterion) {
    let text = r#"{ id: 123, name: "Alice", email: "alice@example.com", active: true }"#;

    c.bench_function("deserialize_simple_struct", |b| {
        b.iter(|| from_str::<User>(black_box(text)))
    });
}

fn benchmark_serialize_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_catalog");

    for size in [10, 50, 100, 500].iter() {
        let catalog = catalog(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| to_string(black_box(&catalog)))
        });
    }
    group.finish();
}

fn benchmark_deserialize_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize_catalog");

    for size in [10, 50, 100, 500].iter() {
        let text = to_string(&catalog(*size)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str::<Catalog>(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let user = user();

    let mut group = c.benchmark_group("comparison");

    group.bench_function("dcf_serialize", |b| {
        b.iter(|| serde_dcf::to_string(black_box(&user)))
    });

    group.bench_function("json_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&user)))
    });

    let dcf_str = serde_dcf::to_string(&user).unwrap();
    let json_str = serde_json::to_string(&user).unwrap();

    group.bench_function("dcf_deserialize", |b| {
        b.iter(|| serde_dcf::from_str::<User>(black_box(&dcf_str)))
    });

    group.bench_function("json_deserialize", |b| {
        b.iter(|| serde_json::from_str::<User>(black_box(&json_str)))
    });

    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let user = user();

    c.bench_function("roundtrip_simple", |b| {
        b.iter(|| {
            let serialized = to_string(black_box(&user)).unwrap();
            let _deserialized: User = from_str(black_box(&serialized)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_parse_commented,
    benchmark_render_commented,
    benchmark_serialize_simple,
    benchmark_deserialize_simple,
    benchmark_serialize_catalog,
    benchmark_deserialize_catalog,
    benchmark_comparison_with_json,
    benchmark_roundtrip
);
criterion_main!(benches);
