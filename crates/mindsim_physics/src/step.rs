use mindsim_core::{Body, Boundary, SimConfig, SpeedPolicy};
use rand::Rng;

use super::boundary::{contain, Containment};
use super::collision::resolve_all;
use super::speed::enforce_speed;

/// Per-container physics parameters that don't change between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepParams {
    pub restitution: f32,
    pub policy: SpeedPolicy,
}

impl StepParams {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            restitution: config.restitution,
            policy: config.speed_policy,
        }
    }
}

/// What happened during one step (for HUD/diagnostics; the physics doesn't read it)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Bodies pulled back by the wall during integration
    pub wall_contacts: u32,
    /// Of those, bodies whose velocity was reflected
    pub reflections: u32,
    /// Overlapping pairs pushed apart
    pub pair_contacts: u32,
    /// Pairs that exchanged an impulse
    pub impulses: u32,
    /// Pairs skipped because their centers coincide
    pub coincident: u32,
    /// Bodies the final safety pass had to re-clamp
    pub reclamped: u32,
}

/// Advance every body by `dt` seconds.
///
/// Three phases, each finishing over all bodies before the next starts:
/// 1. speed invariant, integrate, wall containment
/// 2. pairwise collisions in (i, j) index order
/// 3. wall re-clamp and speed invariant again, since pair pushes can land a
///    body past the wall
///
/// A non-finite or negative `dt` integrates nothing but still runs the passes.
pub fn step(
    bodies: &mut [Body],
    boundary: &Boundary,
    params: &StepParams,
    dt: f32,
    rng: &mut impl Rng,
) -> StepReport {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    let mut report = StepReport::default();

    for body in bodies.iter_mut() {
        enforce_speed(body, &params.policy, rng);
        body.position += body.velocity * dt;

        match contain(body, boundary, params.restitution, &params.policy, rng) {
            Containment::Inside => {}
            Containment::Clamped => report.wall_contacts += 1,
            Containment::Reflected => {
                report.wall_contacts += 1;
                report.reflections += 1;
            }
        }
    }

    let stats = resolve_all(bodies, params.restitution, &params.policy, rng);
    report.pair_contacts = stats.contacts;
    report.impulses = stats.impulses;
    report.coincident = stats.coincident;

    for body in bodies.iter_mut() {
        if contain(body, boundary, params.restitution, &params.policy, rng).touched_wall() {
            report.reclamped += 1;
        }
        enforce_speed(body, &params.policy, rng);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindsim_core::Vec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn cruise(restitution: f32) -> StepParams {
        StepParams {
            restitution,
            policy: SpeedPolicy::Cruise,
        }
    }

    #[test]
    fn test_free_body_integrates_linearly() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut bodies = vec![Body {
            position: Vec3::ZERO,
            velocity: Vec3::new(0.5, 0.0, 0.0),
            radius: 0.05,
            cruise_speed: 0.5,
        }];

        let report = step(&mut bodies, &Boundary::new(1.0), &cruise(1.0), 0.02, &mut rng);

        assert_eq!(report, StepReport::default());
        assert!((bodies[0].position.x - 0.01).abs() < 1e-7);
    }

    #[test]
    fn test_wall_hit_reflects_and_contains() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let boundary = Boundary::new(0.9);
        let mut bodies = vec![Body {
            position: Vec3::new(0.86, 0.0, 0.0),
            velocity: Vec3::new(1.0, 0.0, 0.0),
            radius: 0.06,
            cruise_speed: 1.0,
        }];

        let report = step(&mut bodies, &boundary, &cruise(1.0), 0.016, &mut rng);

        assert_eq!(report.reflections, 1);
        assert!(bodies[0].velocity.x < 0.0);
        assert!(boundary.contains(&bodies[0], 1e-4));
        assert!((bodies[0].speed() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_overlapping_pair_separated_in_one_step() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut bodies = vec![
            Body {
                position: Vec3::ZERO,
                velocity: Vec3::ZERO,
                radius: 0.06,
                cruise_speed: 0.25,
            },
            Body {
                position: Vec3::new(0.05, 0.0, 0.0),
                velocity: Vec3::ZERO,
                radius: 0.06,
                cruise_speed: 0.25,
            },
        ];

        let report = step(&mut bodies, &Boundary::new(0.9), &cruise(1.0), 0.016, &mut rng);

        assert_eq!(report.pair_contacts, 1);
        assert!(bodies[0].position.distance(bodies[1].position) >= 0.12 - 1e-5);
        for b in &bodies {
            assert_ne!(b.velocity, Vec3::ZERO);
            assert!((b.speed() - 0.25).abs() < 1e-5);
        }
    }

    #[test]
    fn test_bad_dt_does_not_move_bodies() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let start = Vec3::new(0.1, 0.2, 0.3);
        let mut bodies = vec![Body {
            position: start,
            velocity: Vec3::new(0.0, 0.3, 0.0),
            radius: 0.05,
            cruise_speed: 0.3,
        }];

        for dt in [f32::NAN, f32::INFINITY, -1.0] {
            step(&mut bodies, &Boundary::new(1.0), &cruise(1.0), dt, &mut rng);
            assert_eq!(bodies[0].position, start);
        }
    }

    #[test]
    fn test_band_policy_holds_over_many_steps() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let boundary = Boundary::new(0.9);
        let params = StepParams {
            restitution: 0.95,
            policy: SpeedPolicy::Band {
                min_speed: 0.2,
                max_speed: 0.8,
            },
        };
        let mut bodies: Vec<Body> = (0..10)
            .map(|i| Body {
                position: Vec3::new(-0.6 + i as f32 * 0.13, 0.0, 0.0),
                velocity: Vec3::new(0.0, if i % 2 == 0 { 2.0 } else { 0.01 }, 0.0),
                radius: 0.06,
                cruise_speed: 0.5,
            })
            .collect();

        for _ in 0..500 {
            step(&mut bodies, &boundary, &params, 0.016, &mut rng);
            for b in &bodies {
                assert!(params.policy.admits(b.speed(), b.cruise_speed, 1e-4));
                assert!(boundary.contains(b, 1e-4));
            }
        }
    }
}
