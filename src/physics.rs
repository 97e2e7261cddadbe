use crate::particle::Vec2;

/// Velocity retained along an axis after bouncing off a boundary.
const RESTITUTION: f32 = 0.8;

/// Force constants for one particle class.
#[derive(Debug, Clone, Copy)]
pub struct AttractionProfile {
    /// Radial pull toward the pointer, scaled by the well force
    pub strength: f32,
    /// Secondary centering pull, proportional to the coordinate delta
    pub center_pull: f32,
    /// Tangential component perpendicular to the radial direction
    pub spiral: f32,
    /// Hard cap on speed magnitude
    pub max_speed: f32,
    /// Per-tick velocity damping
    pub friction: f32,
}

pub const AMBIENT: AttractionProfile = AttractionProfile {
    strength: 15.0,
    center_pull: 0.1,
    spiral: 0.5,
    max_speed: 2.0,
    friction: 0.99,
};

/// The golden particle is pulled in harder and spirals more, so it reads as
/// more exciting to chase.
pub const GOLDEN: AttractionProfile = AttractionProfile {
    strength: 20.0,
    center_pull: 0.15,
    spiral: 0.8,
    max_speed: 3.0,
    friction: 0.98,
};

#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StepOutcome {
    /// Distance to the pointer measured before the position update, used by
    /// the capture rules.
    pub pointer_distance: Option<f32>,
    /// Pull force in [0, 1] when the particle was inside the well this tick.
    pub pull: Option<f32>,
}

/// Advances one particle by one tick: attraction, integration, boundary
/// reflection, speed clamp, friction. A pointer exactly on the particle
/// (distance 0) applies no attraction, so there is no division by zero.
pub fn step(
    position: &mut Vec2,
    velocity: &mut Vec2,
    pointer: Option<Vec2>,
    bounds: Bounds,
    well_radius: f32,
    profile: &AttractionProfile,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    if let Some(pointer) = pointer {
        let delta = pointer - *position;
        let distance = delta.norm();
        outcome.pointer_distance = Some(distance);

        if distance < well_radius && distance > 0.0 {
            let force = (well_radius - distance) / well_radius;
            let angle = delta.y.atan2(delta.x);

            velocity.x += angle.cos() * force * profile.strength;
            velocity.y += angle.sin() * force * profile.strength;

            let centering = 1.0 - distance / well_radius;
            *velocity += delta * (centering * profile.center_pull);

            let tangent = angle + std::f32::consts::FRAC_PI_2;
            velocity.x += tangent.cos() * force * profile.spiral;
            velocity.y += tangent.sin() * force * profile.spiral;

            outcome.pull = Some(force);
        }
    }

    *position += *velocity;

    if position.x < 0.0 {
        position.x = 0.0;
        velocity.x = velocity.x.abs() * RESTITUTION;
    }
    if position.x > bounds.width {
        position.x = bounds.width;
        velocity.x = -velocity.x.abs() * RESTITUTION;
    }
    if position.y < 0.0 {
        position.y = 0.0;
        velocity.y = velocity.y.abs() * RESTITUTION;
    }
    if position.y > bounds.height {
        position.y = bounds.height;
        velocity.y = -velocity.y.abs() * RESTITUTION;
    }

    let speed = velocity.norm();
    if speed > profile.max_speed {
        *velocity *= profile.max_speed / speed;
    }

    *velocity *= profile.friction;

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds { width: 800.0, height: 600.0 };

    #[test]
    fn position_stays_in_bounds() {
        let mut position = Vec2::new(400.0, 300.0);
        let mut velocity = Vec2::new(1.7, -1.3);
        for i in 0..5_000 {
            let pointer = Some(Vec2::new(
                (i % 800) as f32,
                ((i * 7) % 600) as f32,
            ));
            step(&mut position, &mut velocity, pointer, BOUNDS, 200.0, &AMBIENT);
            assert!(position.x >= 0.0 && position.x <= BOUNDS.width);
            assert!(position.y >= 0.0 && position.y <= BOUNDS.height);
        }
    }

    #[test]
    fn speed_never_exceeds_cap_after_clamp() {
        let mut position = Vec2::new(400.0, 300.0);
        let mut velocity = Vec2::new(0.0, 0.0);
        // Pointer held close so the attraction keeps feeding energy in.
        let pointer = Some(Vec2::new(410.0, 300.0));
        for _ in 0..100 {
            step(&mut position, &mut velocity, pointer, BOUNDS, 200.0, &AMBIENT);
            // Friction runs after the clamp, so the cap itself is the limit.
            assert!(velocity.norm() <= AMBIENT.max_speed + 1e-4);
        }
    }

    #[test]
    fn golden_cap_is_higher() {
        let mut position = Vec2::new(400.0, 300.0);
        let mut velocity = Vec2::new(0.0, 0.0);
        let pointer = Some(Vec2::new(410.0, 300.0));
        let mut peak: f32 = 0.0;
        for _ in 0..100 {
            step(&mut position, &mut velocity, pointer, BOUNDS, 200.0, &GOLDEN);
            peak = peak.max(velocity.norm());
            assert!(velocity.norm() <= GOLDEN.max_speed + 1e-4);
        }
        assert!(peak > AMBIENT.max_speed);
    }

    #[test]
    fn zero_distance_applies_no_attraction() {
        let mut position = Vec2::new(400.0, 300.0);
        let mut velocity = Vec2::new(0.5, 0.0);
        let pointer = Some(position);
        let outcome = step(&mut position, &mut velocity, pointer, BOUNDS, 200.0, &AMBIENT);
        assert_eq!(outcome.pointer_distance, Some(0.0));
        assert!(outcome.pull.is_none());
        assert!(velocity.x.is_finite() && velocity.y.is_finite());
        // Only friction acted on the velocity.
        assert!((velocity.x - 0.5 * AMBIENT.friction).abs() < 1e-6);
    }

    #[test]
    fn boundary_bounce_is_inelastic() {
        let mut position = Vec2::new(1.0, 300.0);
        let mut velocity = Vec2::new(-2.0, 0.0);
        step(&mut position, &mut velocity, None, BOUNDS, 200.0, &AMBIENT);
        assert_eq!(position.x, 0.0);
        // Reflected inward at 0.8 restitution, then friction.
        assert!((velocity.x - 2.0 * 0.8 * AMBIENT.friction).abs() < 1e-5);
    }

    #[test]
    fn no_pointer_means_drift_and_friction_only() {
        let mut position = Vec2::new(400.0, 300.0);
        let mut velocity = Vec2::new(1.0, -1.0);
        let outcome = step(&mut position, &mut velocity, None, BOUNDS, 200.0, &AMBIENT);
        assert!(outcome.pointer_distance.is_none());
        assert_eq!(position, Vec2::new(401.0, 299.0));
        assert!((velocity.x - AMBIENT.friction).abs() < 1e-6);
    }
}
