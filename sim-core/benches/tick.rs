use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sim_core::{Simulation, config::SimConfig};

fn bench_tick(c: &mut Criterion) {
    for group_size in [50, 200] {
        let cfg = SimConfig {
            group_size,
            seed: Some(1),
            ..SimConfig::default()
        };
        let mut sim = Simulation::with_scatter(cfg).unwrap();
        let dt = sim.config().delta_time;

        c.bench_function(&format!("tick_{}_particles", sim.len()), |b| {
            b.iter(|| {
                sim.tick(dt).ok();
                black_box(sim.current_state().len())
            })
        });
    }
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
