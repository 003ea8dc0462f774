// Criterion benchmarks for the aidfinder search pipeline

use aidfinder::core::{haversine_distance, search};
use aidfinder::models::{Coordinates, Listing, SearchCriteria};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn create_listing(id: usize, lat: f64, lon: f64) -> Listing {
    let categories = ["food bank", "shelter", "clinic", "education", "recycling center"];
    Listing {
        id: id as i64,
        name: format!("Listing {}", id),
        category: categories[id % categories.len()].to_string(),
        description: "Community service listing for benchmark runs".to_string(),
        address: format!("{} Jalan Ampang, Kuala Lumpur", id),
        latitude: Some(lat),
        longitude: Some(lon),
        phone: None,
        email: None,
        hours: None,
        rating: (id % 6) as f64,
        provider_id: None,
        is_approved: true,
        is_held: false,
        is_rejected: false,
        created_at: None,
    }
}

fn create_catalog(size: usize) -> Vec<Listing> {
    (0..size)
        .map(|i| {
            let lat_offset = (i as f64 * 0.001) % 0.5;
            let lon_offset = (i as f64 * 0.001) % 0.5;
            create_listing(i, 3.1390 + lat_offset, 101.6869 + lon_offset)
        })
        .collect()
}

fn proximity_criteria() -> SearchCriteria {
    SearchCriteria {
        origin: Some(Coordinates { lat: 3.1390, lon: 101.6869 }),
        radius_km: Some(25.0),
        min_rating: Some(2.0),
        ..Default::default()
    }
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(3.1390),
                black_box(101.6869),
                black_box(3.1426),
                black_box(101.7074),
            )
        });
    });
}

fn bench_search_pipeline(c: &mut Criterion) {
    let criteria = proximity_criteria();

    let mut group = c.benchmark_group("search");

    for catalog_size in [10, 50, 100, 500, 1000].iter() {
        let catalog = create_catalog(*catalog_size);

        group.bench_with_input(
            BenchmarkId::new("proximity_search", catalog_size),
            catalog_size,
            |b, _| {
                b.iter(|| search(black_box(catalog.clone()), black_box(&criteria)));
            },
        );
    }

    group.finish();
}

fn bench_keyword_search(c: &mut Criterion) {
    let catalog = create_catalog(500);
    let criteria = SearchCriteria {
        keyword: Some("jalan ampang".to_string()),
        category: Some("clinic".to_string()),
        ..Default::default()
    };

    c.bench_function("keyword_category_search_500", |b| {
        b.iter(|| search(black_box(catalog.clone()), black_box(&criteria)));
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_search_pipeline,
    bench_keyword_search
);

criterion_main!(benches);
