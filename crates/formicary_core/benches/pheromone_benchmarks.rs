use criterion::{black_box, criterion_group, criterion_main, Criterion};
use formicary_core::pheromone::{PheromoneField, PheromoneType};
use formicary_core::underground::UndergroundGrid;
use formicary_data::Position;

fn seeded_field() -> PheromoneField {
    let mut field = PheromoneField::new(1200.0, 800.0, 10.0, 10.0, 0.01);
    for i in 0..2000 {
        let x = (i % 120) as f64 * 10.0 + 5.0;
        let y = (i / 120) as f64 * 10.0 + 5.0;
        for kind in PheromoneType::ALL {
            field.deposit(kind, x, y, 3.0);
        }
    }
    field
}

fn bench_pheromone_decay(c: &mut Criterion) {
    let mut field = seeded_field();
    let rates = [0.05, 0.03, 0.2];

    c.bench_function("pheromone_decay_all_120x80", |b| {
        b.iter(|| {
            field.decay_all(black_box(0.016), &rates);
            black_box(field.total(PheromoneType::Food))
        })
    });
}

fn bench_pheromone_diffuse(c: &mut Criterion) {
    let mut field = seeded_field();

    c.bench_function("pheromone_diffuse_all_120x80", |b| {
        b.iter(|| {
            field.diffuse_all(black_box(0.1));
            black_box(field.max_value(PheromoneType::Nest))
        })
    });
}

fn bench_pheromone_sample(c: &mut Criterion) {
    let field = seeded_field();

    c.bench_function("pheromone_sample_compass", |b| {
        b.iter(|| {
            let mut best = 0.0f32;
            for i in 0..8 {
                let angle = i as f64 * std::f64::consts::FRAC_PI_4;
                let s = field.sample(
                    PheromoneType::Food,
                    600.0 + angle.cos() * 20.0,
                    400.0 + angle.sin() * 20.0,
                );
                best = best.max(s);
            }
            black_box(best)
        })
    });
}

fn bench_nearest_passable(c: &mut Criterion) {
    let grid = UndergroundGrid::seeded(60, 40, 16.0, 10.0, 10.0);

    c.bench_function("underground_nearest_passable_far", |b| {
        b.iter(|| black_box(grid.nearest_passable(black_box(Position::new(900.0, 600.0)))))
    });
}

criterion_group!(
    benches,
    bench_pheromone_decay,
    bench_pheromone_diffuse,
    bench_pheromone_sample,
    bench_nearest_passable
);
criterion_main!(benches);
