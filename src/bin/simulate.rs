//! Headless run of a single container.
//! Steps a config for a fixed number of frames and reports the invariants.
//!
//! Usage: simulate [config.yaml] [steps]

use mindsim_core::SimConfig;
use mindsim_sim::Container;
use std::path::Path;

const DT: f32 = 1.0 / 60.0;
const REPORT_EVERY: u64 = 600;

#[derive(Default)]
struct Totals {
    wall_contacts: u64,
    reflections: u64,
    impulses: u64,
    coincident: u64,
    worst_violation: f32,
    worst_speed_error: f32,
    worst_overlap: f32,
}

fn main() {
    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(path) => match SimConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Could not load {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => SimConfig::container_demo(),
    };
    let steps: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(6_000);

    let mut container = match Container::from_config(&config) {
        Ok(container) => container,
        Err(err) => {
            eprintln!("Invalid config: {}", err);
            std::process::exit(1);
        }
    };

    eprintln!(
        "Stepping {} bodies for {} frames ({} policy, seed {})...",
        container.len(),
        steps,
        config.speed_policy.name(),
        config.seed
    );

    let start_energy = container.kinetic_energy();
    let mut totals = Totals::default();

    for i in 1..=steps {
        container.step(DT);

        let report = container.last_report();
        totals.wall_contacts += report.wall_contacts as u64;
        totals.reflections += report.reflections as u64;
        totals.impulses += report.impulses as u64;
        totals.coincident += report.coincident as u64;
        totals.worst_violation = totals.worst_violation.max(container.max_containment_violation());
        totals.worst_speed_error = totals.worst_speed_error.max(container.max_speed_error());
        totals.worst_overlap = totals.worst_overlap.max(container.max_overlap());

        if i % REPORT_EVERY == 0 {
            eprintln!(
                "  frame {:>7}  energy {:.5}  violation {:.2e}  overlap {:.2e}",
                i,
                container.kinetic_energy(),
                container.max_containment_violation(),
                container.max_overlap()
            );
        }
    }

    println!("=== Containment run ===");
    println!("Bodies:            {}", container.len());
    println!("Frames:            {} (dt {:.4}s)", container.step_count(), DT);
    println!("Boundary radius:   {:.3} (scale {:.3})", config.boundary_radius, config.scale_factor);
    println!("Speed policy:      {}", config.speed_policy.name());
    println!();
    println!("Wall contacts:     {}", totals.wall_contacts);
    println!("Reflections:       {}", totals.reflections);
    println!("Pair impulses:     {}", totals.impulses);
    println!("Coincident pairs:  {}", totals.coincident);
    println!();
    println!("Energy start/end:  {:.5} / {:.5}", start_energy, container.kinetic_energy());
    println!("Worst violation:   {:.3e}", totals.worst_violation);
    println!("Worst speed error: {:.3e}", totals.worst_speed_error);
    println!("Worst overlap:     {:.3e}", totals.worst_overlap);
}
