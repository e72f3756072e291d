use mindsim_core::{Body, SpeedPolicy, Vec3};
use rand::Rng;

/// Uniformly distributed direction on the unit sphere
pub fn random_direction(rng: &mut impl Rng) -> Vec3 {
    // Spherical coordinates with phi = acos(2u - 1) so directions don't bunch at the poles
    let theta = rng.gen_range(0.0..std::f32::consts::TAU);
    let phi = (2.0 * rng.gen_range(0.0..1.0f32) - 1.0).clamp(-1.0, 1.0).acos();

    Vec3::new(
        phi.sin() * theta.cos(),
        phi.sin() * theta.sin(),
        phi.cos(),
    )
}

/// Apply the container's speed invariant to one body.
/// Returns true when the velocity was changed.
pub fn enforce_speed(body: &mut Body, policy: &SpeedPolicy, rng: &mut impl Rng) -> bool {
    if !body.is_driven() {
        return false;
    }

    let speed = body.velocity.length();
    // NaN/inf velocities are treated like a body at rest
    let stalled = speed == 0.0 || !speed.is_finite();

    match *policy {
        SpeedPolicy::Cruise => {
            if stalled {
                body.velocity = random_direction(rng) * body.cruise_speed;
                return true;
            }
            if speed == body.cruise_speed {
                return false;
            }
            body.velocity = body.velocity * (body.cruise_speed / speed);
            true
        }
        SpeedPolicy::Band {
            min_speed,
            max_speed,
        } => {
            if stalled || speed < min_speed {
                body.velocity = random_direction(rng) * min_speed;
                true
            } else if speed > max_speed {
                body.velocity = body.velocity * (max_speed / speed);
                true
            } else {
                false
            }
        }
    }
}
