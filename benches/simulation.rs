//! Performance benchmarks for HABITAT

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use habitat::config::WorldConfig;
use habitat::ecology::Infector;
use habitat::population::Population;
use habitat::{Config, Field, Location, Organism, SeededRandom, Sex, Simulator, Species};

fn benchmark_simulator_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulator_step");

    for size in [40usize, 80, 160].iter() {
        let mut config = Config::default();
        config.world = WorldConfig {
            depth: *size,
            width: *size * 3 / 2,
        };

        let mut sim = Simulator::new_with_seed(config, 42);

        // Warm up
        sim.run(10);

        group.bench_with_input(BenchmarkId::new("side", size), size, |b, _| {
            b.iter(|| {
                sim.step();
            });
        });
    }

    group.finish();
}

fn benchmark_neighbors(c: &mut Criterion) {
    let field = Field::new(80, 120);

    c.bench_function("field_neighbors_interior", |b| {
        b.iter(|| field.neighbors(black_box(Location::new(40, 60))));
    });

    c.bench_function("field_neighbors_corner", |b| {
        b.iter(|| field.neighbors(black_box(Location::new(0, 0))));
    });
}

fn benchmark_infection(c: &mut Criterion) {
    let mut field = Field::new(3, 3);
    let mut population = Population::new();
    for row in 0..3 {
        for col in 0..3 {
            let loc = Location::new(row, col);
            population.insert(Organism::new(Species::Rat, Sex::Female, 1, loc), &mut field);
        }
    }
    let neighbors = field.neighbors(Location::new(1, 1));
    let infector = Infector::default();
    let mut rng = SeededRandom::new(7);

    c.bench_function("infect_full_neighborhood", |b| {
        b.iter(|| {
            infector.infect(
                Species::Rat,
                black_box(&neighbors),
                &field,
                &mut population,
                &mut rng,
            )
        });
    });
}

fn benchmark_seeding(c: &mut Criterion) {
    c.bench_function("seed_default_field", |b| {
        b.iter(|| Simulator::new_with_seed(Config::default(), black_box(42)));
    });
}

criterion_group!(
    benches,
    benchmark_simulator_step,
    benchmark_neighbors,
    benchmark_infection,
    benchmark_seeding,
);

criterion_main!(benches);
