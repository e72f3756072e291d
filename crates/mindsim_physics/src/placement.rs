use mindsim_core::{Body, Boundary, Vec3};
use rand::Rng;

use super::speed::random_direction;

/// Build a body. Without an explicit velocity it starts in a random direction
/// at its cruise speed (at rest when the cruise speed is 0).
pub fn create_body(
    position: Vec3,
    radius: f32,
    cruise_speed: f32,
    initial_velocity: Option<Vec3>,
    rng: &mut impl Rng,
) -> Body {
    let velocity = initial_velocity.unwrap_or_else(|| random_direction(rng) * cruise_speed);

    Body {
        position,
        velocity,
        radius,
        cruise_speed,
    }
}

/// Rejection-sample a point inside a sphere of `radius`: draw from the cube
/// `[-r, r]^3` and keep the first draw with `x² + y² + z² <= r²`.
/// `None` when every attempt landed in a corner.
pub fn random_point_in_sphere(radius: f32, attempts: u32, rng: &mut impl Rng) -> Option<Vec3> {
    if !radius.is_finite() || radius <= 0.0 {
        return Some(Vec3::ZERO);
    }

    let r2 = radius * radius;
    for _ in 0..attempts {
        let p = Vec3::new(
            rng.gen_range(-radius..=radius),
            rng.gen_range(-radius..=radius),
            rng.gen_range(-radius..=radius),
        );
        if p.length_squared() <= r2 {
            return Some(p);
        }
    }
    None
}

/// Random local position where a body of `body_radius` fits inside the boundary.
/// Falls back to the origin when sampling runs out of attempts.
pub fn sample_inside(
    boundary: &Boundary,
    body_radius: f32,
    attempts: u32,
    rng: &mut impl Rng,
) -> Vec3 {
    random_point_in_sphere(boundary.local_limit(body_radius), attempts, rng).unwrap_or(Vec3::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_create_body_seeds_velocity() {
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let b = create_body(Vec3::ZERO, 0.06, 0.4, None, &mut rng);
        assert!((b.speed() - 0.4).abs() < 1e-6);

        let still = create_body(Vec3::ZERO, 0.06, 0.0, None, &mut rng);
        assert_eq!(still.velocity, Vec3::ZERO);

        let given = create_body(Vec3::X, 0.06, 0.4, Some(Vec3::Y), &mut rng);
        assert_eq!(given.velocity, Vec3::Y);
        assert_eq!(given.position, Vec3::X);
    }

    #[test]
    fn test_samples_stay_inside() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let boundary = Boundary::with_scale(1.0, 1.5);
        let limit = boundary.local_limit(0.06);
        for _ in 0..500 {
            let p = sample_inside(&boundary, 0.06, 32, &mut rng);
            assert!(p.length() <= limit + 1e-6);
        }
    }

    #[test]
    fn test_zero_attempts_falls_back_to_origin() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        assert_eq!(random_point_in_sphere(1.0, 0, &mut rng), None);
        assert_eq!(sample_inside(&Boundary::new(1.0), 0.1, 0, &mut rng), Vec3::ZERO);
    }

    #[test]
    fn test_same_seed_same_placement() {
        let mut a = ChaCha8Rng::seed_from_u64(13);
        let mut b = ChaCha8Rng::seed_from_u64(13);
        let boundary = Boundary::new(0.9);
        for _ in 0..20 {
            assert_eq!(
                sample_inside(&boundary, 0.06, 32, &mut a),
                sample_inside(&boundary, 0.06, 32, &mut b)
            );
        }
    }
}
