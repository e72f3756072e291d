use mindsim_core::{Body, Boundary, SpeedPolicy};

/// Total kinetic energy with unit masses
pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies
        .iter()
        .map(|b| 0.5 * b.velocity.length_squared() as f64)
        .sum()
}

/// Worst wall penetration in world units (<= 0 when everything is contained)
pub fn max_penetration(bodies: &[Body], boundary: &Boundary) -> f32 {
    bodies
        .iter()
        .map(|b| boundary.penetration(b))
        .fold(f32::NEG_INFINITY, f32::max)
}

/// Largest distance of any driven body's speed from what the policy allows
pub fn max_speed_error(bodies: &[Body], policy: &SpeedPolicy) -> f32 {
    bodies
        .iter()
        .filter(|b| b.is_driven())
        .map(|b| {
            let speed = b.speed();
            match *policy {
                SpeedPolicy::Cruise => (speed - b.cruise_speed).abs(),
                SpeedPolicy::Band {
                    min_speed,
                    max_speed,
                } => (min_speed - speed).max(speed - max_speed).max(0.0),
            }
        })
        .fold(0.0, f32::max)
}

/// Deepest remaining pair overlap (0 when no two bodies intersect)
pub fn max_overlap(bodies: &[Body]) -> f32 {
    let mut worst = 0.0f32;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let overlap = a.radius + b.radius - a.position.distance(b.position);
            worst = worst.max(overlap);
        }
    }
    worst
}
