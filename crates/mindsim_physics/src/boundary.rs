use mindsim_core::{Body, Boundary, SpeedPolicy, Vec3};
use rand::Rng;

use super::speed::enforce_speed;

/// What containment did to a body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    /// Already inside the limit, nothing changed
    Inside,
    /// Pulled back to the limit; velocity was already pointing inward
    Clamped,
    /// Pulled back and its outward velocity reflected
    Reflected,
}

impl Containment {
    pub fn touched_wall(&self) -> bool {
        !matches!(self, Self::Inside)
    }
}

/// Keep a body inside a spherical boundary.
///
/// Positions live in the boundary's local space; the comparison happens in world
/// units (`|p| * scale` against `R*scale - r*scale - margin`) and the clamped
/// position is converted back by dividing by the scale. The wall normal is taken
/// from the current (post-integration) position, so a body that slid along the
/// wall reflects where it is now, not where it was last frame.
pub fn contain(
    body: &mut Body,
    boundary: &Boundary,
    restitution: f32,
    policy: &SpeedPolicy,
    rng: &mut impl Rng,
) -> Containment {
    let limit = boundary.world_limit(body.radius);
    let distance = boundary.world_distance(body.position);

    if distance <= limit {
        return Containment::Inside;
    }

    // Dead center only happens when the limit itself is zero; +X by convention
    let normal = body.position.normalize_or(Vec3::X);

    let vn = body.velocity.dot(normal);
    let reflected = vn > 0.0;
    if reflected {
        body.velocity -= normal * ((1.0 + restitution) * vn);
    }

    body.position = normal * boundary.local_limit(body.radius);

    if reflected {
        enforce_speed(body, policy, rng);
        Containment::Reflected
    } else {
        Containment::Clamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn body(position: Vec3, velocity: Vec3, radius: f32, cruise_speed: f32) -> Body {
        Body {
            position,
            velocity,
            radius,
            cruise_speed,
        }
    }

    #[test]
    fn test_inside_body_untouched() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let boundary = Boundary::new(1.0);
        let mut b = body(Vec3::new(0.5, 0.0, 0.0), Vec3::X, 0.1, 1.0);
        let before = b;
        let result = contain(&mut b, &boundary, 1.0, &SpeedPolicy::Cruise, &mut rng);
        assert_eq!(result, Containment::Inside);
        assert_eq!(b, before);
    }

    #[test]
    fn test_outward_body_reflected_and_clamped() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let boundary = Boundary::new(0.9);
        let mut b = body(Vec3::new(0.876, 0.0, 0.0), Vec3::X, 0.06, 1.0);

        let result = contain(&mut b, &boundary, 1.0, &SpeedPolicy::Cruise, &mut rng);

        assert_eq!(result, Containment::Reflected);
        assert!((b.position.x - 0.83).abs() < 1e-5);
        assert!(b.velocity.x < 0.0);
        assert!((b.speed() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_damped_reflection_renormalized() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let boundary = Boundary::new(1.0);
        let mut b = body(Vec3::new(0.0, 0.99, 0.0), Vec3::new(0.3, 0.4, 0.0), 0.05, 0.5);

        contain(&mut b, &boundary, 0.9, &SpeedPolicy::Cruise, &mut rng);

        assert!(b.velocity.y < 0.0);
        assert!(b.velocity.x > 0.0);
        assert!((b.speed() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_inward_body_only_clamped() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let boundary = Boundary::new(1.0);
        let inward = Vec3::new(-0.2, 0.0, 0.0);
        let mut b = body(Vec3::new(0.99, 0.0, 0.0), inward, 0.05, 0.2);

        let result = contain(&mut b, &boundary, 1.0, &SpeedPolicy::Cruise, &mut rng);

        assert_eq!(result, Containment::Clamped);
        assert_eq!(b.velocity, inward);
        assert!((b.position.x - 0.94).abs() < 1e-5);
    }

    #[test]
    fn test_scaled_boundary_two_space_clamp() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        // Unit sphere in a frame scaled by 2: world limit = 2 - 0.12 - 0.01 = 1.87
        let boundary = Boundary::with_scale(1.0, 2.0);
        let mut b = body(Vec3::new(0.0, 0.0, 0.97), Vec3::Z, 0.06, 1.0);

        contain(&mut b, &boundary, 1.0, &SpeedPolicy::Cruise, &mut rng);

        assert!((b.position.z - 0.935).abs() < 1e-5);
        assert!((boundary.world_distance(b.position) - 1.87).abs() < 1e-5);
        assert!(b.velocity.z < 0.0);
    }

    #[test]
    fn test_oversized_body_pinned_to_center() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let boundary = Boundary::new(0.1);
        let mut b = body(Vec3::ZERO, Vec3::ZERO, 0.2, 0.0);

        // limit is 0 and distance is 0: counts as inside
        assert_eq!(
            contain(&mut b, &boundary, 1.0, &SpeedPolicy::Cruise, &mut rng),
            Containment::Inside
        );

        b.position = Vec3::new(0.0, 0.3, 0.0);
        contain(&mut b, &boundary, 1.0, &SpeedPolicy::Cruise, &mut rng);
        assert_eq!(b.position.length(), 0.0);
    }
}
