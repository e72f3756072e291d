use mindsim_core::{Body, SpeedPolicy};
use rand::Rng;

use super::speed::enforce_speed;

/// Outcome of checking one pair of bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairContact {
    /// Not overlapping
    Apart,
    /// Centers coincide; no normal exists, so the pair is left alone
    Coincident,
    /// Overlap pushed apart; the bodies were already separating
    Separated,
    /// Overlap pushed apart and an impulse exchanged
    Impulse,
}

/// Counters for one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionStats {
    pub contacts: u32,
    pub impulses: u32,
    pub coincident: u32,
}

/// Resolve one overlapping pair as equal unit masses.
///
/// Each body is pushed half the overlap along the line of centers, then, if the
/// pair is closing, an impulse `-(1 + e) * closing / 2` is exchanged along the
/// normal. Speed renormalization is left to the caller.
pub fn resolve_pair(a: &mut Body, b: &mut Body, restitution: f32) -> PairContact {
    let delta = b.position - a.position;
    let d = delta.length();
    let min_d = a.radius + b.radius;

    if d == 0.0 {
        return PairContact::Coincident;
    }
    if d >= min_d {
        return PairContact::Apart;
    }

    let n = delta * (1.0 / d);
    let push = n * ((min_d - d) * 0.5);
    a.position -= push;
    b.position += push;

    let closing = (b.velocity - a.velocity).dot(n);
    if closing >= 0.0 {
        return PairContact::Separated;
    }

    let j = -(1.0 + restitution) * closing * 0.5;
    a.velocity -= n * j;
    b.velocity += n * j;
    PairContact::Impulse
}

/// Check every unordered pair (i < j) in index order, resolving overlaps in place.
/// Bodies that received an impulse are put back on the speed invariant so a
/// collision only turns them.
pub fn resolve_all(
    bodies: &mut [Body],
    restitution: f32,
    policy: &SpeedPolicy,
    rng: &mut impl Rng,
) -> CollisionStats {
    let mut stats = CollisionStats::default();
    let n = bodies.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let (head, tail) = bodies.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];

            match resolve_pair(a, b, restitution) {
                PairContact::Apart => {}
                PairContact::Coincident => stats.coincident += 1,
                PairContact::Separated => stats.contacts += 1,
                PairContact::Impulse => {
                    stats.contacts += 1;
                    stats.impulses += 1;
                    enforce_speed(a, policy, rng);
                    enforce_speed(b, policy, rng);
                }
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindsim_core::Vec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn body(x: f32, vx: f32, radius: f32, cruise_speed: f32) -> Body {
        Body {
            position: Vec3::new(x, 0.0, 0.0),
            velocity: Vec3::new(vx, 0.0, 0.0),
            radius,
            cruise_speed,
        }
    }

    #[test]
    fn test_head_on_velocities_swap() {
        let mut a = body(-0.05, 1.0, 0.06, 1.0);
        let mut b = body(0.05, -1.0, 0.06, 1.0);

        assert_eq!(resolve_pair(&mut a, &mut b, 1.0), PairContact::Impulse);

        assert!((a.velocity.x + 1.0).abs() < 1e-6);
        assert!((b.velocity.x - 1.0).abs() < 1e-6);
        assert!((a.position.distance(b.position) - 0.12).abs() < 1e-6);
    }

    #[test]
    fn test_unequal_speeds_exchange_momentum() {
        let mut a = body(0.0, 0.8, 0.1, 0.0);
        let mut b = body(0.15, 0.2, 0.1, 0.0);

        resolve_pair(&mut a, &mut b, 1.0);

        // Equal masses, elastic, head-on: velocities exchange
        assert!((a.velocity.x - 0.2).abs() < 1e-6);
        assert!((b.velocity.x - 0.8).abs() < 1e-6);
        let momentum = a.velocity.x + b.velocity.x;
        assert!((momentum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_separating_pair_only_pushed() {
        let mut a = body(0.0, -0.5, 0.06, 0.0);
        let mut b = body(0.1, 0.5, 0.06, 0.0);

        assert_eq!(resolve_pair(&mut a, &mut b, 1.0), PairContact::Separated);
        assert_eq!(a.velocity.x, -0.5);
        assert_eq!(b.velocity.x, 0.5);
        assert!((a.position.x + 0.01).abs() < 1e-6);
        assert!((b.position.x - 0.11).abs() < 1e-6);
    }

    #[test]
    fn test_apart_and_coincident_skipped() {
        let mut a = body(0.0, 0.0, 0.06, 0.0);
        let mut b = body(0.5, 0.0, 0.06, 0.0);
        assert_eq!(resolve_pair(&mut a, &mut b, 1.0), PairContact::Apart);

        let mut c = body(0.2, 1.0, 0.06, 0.0);
        let mut d = body(0.2, -1.0, 0.06, 0.0);
        assert_eq!(resolve_pair(&mut c, &mut d, 1.0), PairContact::Coincident);
        assert_eq!(c.position, d.position);
        assert!(c.velocity.is_finite() && d.velocity.is_finite());
    }

    #[test]
    fn test_resolve_all_keeps_cruise_speed() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut bodies = vec![
            body(-0.04, 0.3, 0.05, 0.3),
            Body {
                position: Vec3::new(0.04, 0.02, 0.0),
                velocity: Vec3::new(-0.3, 0.0, 0.0),
                radius: 0.05,
                cruise_speed: 0.3,
            },
            body(0.8, 0.3, 0.05, 0.3),
        ];

        let stats = resolve_all(&mut bodies, 0.95, &SpeedPolicy::Cruise, &mut rng);

        assert_eq!(stats.contacts, 1);
        assert_eq!(stats.impulses, 1);
        for b in &bodies {
            assert!((b.speed() - 0.3).abs() < 1e-5);
        }
        assert!(bodies[0].position.distance(bodies[1].position) >= 0.1 - 1e-5);
    }
}
