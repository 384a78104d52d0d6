use bevy::prelude::*;

/// A cradle sphere. Bodies are translated only, never rotated, which is the
/// "infinite inertia" behavior the demo wants.
#[derive(Reflect, Component, Default)]
#[reflect(Component)]
pub struct PendulumBody {
    pub radius: f32,
    pub mass: f32,
    pub restitution: f32,
    /// Penetration tolerance for contact resolution.
    pub slop: f32,
    pub prev_position: Vec2,
    pub velocity: Vec2,
}

/// Fixed-length link from a stationary anchor to the body it hangs from.
#[derive(Reflect, Component, Default)]
#[reflect(Component)]
pub struct PivotArm {
    /// World position of the anchor point.
    pub anchor: Vec2,
    pub length: f32,
}

impl PendulumBody {
    pub fn start_step(&mut self, transform: &mut Transform, dt: f32, gravity: Vec2) {
        self.velocity += gravity * dt;
        self.prev_position = transform.translation.truncate();
        transform.translation += self.velocity.extend(0.0) * dt;
    }

    /// Project the body back onto the circle of radius `arm.length` around
    /// the anchor.
    pub fn keep_on_arm(&mut self, arm: &PivotArm, transform: &mut Transform) {
        let dir = transform.translation.truncate() - arm.anchor;
        let len = dir.length();
        if len == 0.0 {
            return;
        }
        let corr = (arm.length - len) / len;
        transform.translation += (dir * corr).extend(0.0);
    }

    pub fn end_step(&mut self, transform: &Transform, dt: f32) {
        self.velocity = transform.translation.truncate() - self.prev_position;
        if dt > 0.0 {
            self.velocity /= dt;
        }
    }
}

pub fn resolve_ball_collision(
    a: &mut PendulumBody,
    trans_a: &mut Transform,
    b: &mut PendulumBody,
    trans_b: &mut Transform,
) {
    let mut dir = (trans_b.translation - trans_a.translation).truncate();
    let d = dir.length();
    if d == 0.0 || d > a.radius + b.radius {
        return;
    }
    dir /= d;

    // Overlap inside the slop tolerance is left to the velocity exchange.
    let slop = a.slop.max(b.slop);
    let corr = (a.radius + b.radius - d - slop).max(0.0) * 0.5;
    trans_a.translation -= (dir * corr).extend(0.0);
    trans_b.translation += (dir * corr).extend(0.0);

    let v1 = a.velocity.dot(dir);
    let v2 = b.velocity.dot(dir);

    let m1 = a.mass;
    let m2 = b.mass;
    let restitution = a.restitution.min(b.restitution);

    let new_v1 = (m1 * v1 + m2 * v2 - m2 * (v1 - v2) * restitution) / (m1 + m2);
    let new_v2 = (m1 * v1 + m2 * v2 - m1 * (v2 - v1) * restitution) / (m1 + m2);

    a.velocity += dir * (new_v1 - v1);
    b.velocity += dir * (new_v2 - v2);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(radius: f32, velocity: Vec2) -> PendulumBody {
        PendulumBody {
            radius,
            mass: 1.0,
            restitution: 1.0,
            slop: radius * 0.02,
            velocity,
            ..default()
        }
    }

    #[test]
    fn arm_constraint_restores_length() {
        let arm = PivotArm {
            anchor: Vec2::ZERO,
            length: 200.0,
        };
        let mut body = ball(30.0, Vec2::ZERO);
        let mut transform = Transform::from_xyz(0.0, -190.0, 0.0);

        body.keep_on_arm(&arm, &mut transform);

        let len = transform.translation.truncate().distance(arm.anchor);
        assert!(
            (len - 200.0).abs() < 1e-3,
            "Body should be projected back to arm length, got {}",
            len
        );
    }

    #[test]
    fn arm_constraint_skips_degenerate_position() {
        let arm = PivotArm {
            anchor: Vec2::ZERO,
            length: 200.0,
        };
        let mut body = ball(30.0, Vec2::ZERO);
        let mut transform = Transform::from_xyz(0.0, 0.0, 0.0);

        // Direction is undefined at the anchor itself, nothing should move.
        body.keep_on_arm(&arm, &mut transform);
        assert_eq!(transform.translation, Vec3::ZERO);
    }

    #[test]
    fn equal_mass_elastic_collision_swaps_velocities() {
        let mut a = ball(30.0, Vec2::new(100.0, 0.0));
        let mut b = ball(30.0, Vec2::ZERO);
        let mut trans_a = Transform::from_xyz(0.0, 0.0, 0.0);
        let mut trans_b = Transform::from_xyz(59.0, 0.0, 0.0);

        resolve_ball_collision(&mut a, &mut trans_a, &mut b, &mut trans_b);

        assert!(
            a.velocity.x.abs() < 1e-3,
            "Struck ball should take the full velocity, striker has {}",
            a.velocity.x
        );
        assert!((b.velocity.x - 100.0).abs() < 1e-3);
    }

    #[test]
    fn separated_balls_are_untouched() {
        let mut a = ball(30.0, Vec2::new(100.0, 0.0));
        let mut b = ball(30.0, Vec2::ZERO);
        let mut trans_a = Transform::from_xyz(0.0, 0.0, 0.0);
        let mut trans_b = Transform::from_xyz(61.0, 0.0, 0.0);

        resolve_ball_collision(&mut a, &mut trans_a, &mut b, &mut trans_b);

        assert_eq!(a.velocity, Vec2::new(100.0, 0.0));
        assert_eq!(b.velocity, Vec2::ZERO);
        assert_eq!(trans_a.translation, Vec3::ZERO);
    }

    #[test]
    fn overlap_within_slop_is_not_pushed_apart() {
        let mut a = ball(30.0, Vec2::ZERO);
        let mut b = ball(30.0, Vec2::ZERO);
        let mut trans_a = Transform::from_xyz(0.0, 0.0, 0.0);
        // Overlap of 0.5 is inside the 0.6 slop for radius 30.
        let mut trans_b = Transform::from_xyz(59.5, 0.0, 0.0);

        resolve_ball_collision(&mut a, &mut trans_a, &mut b, &mut trans_b);

        assert_eq!(trans_a.translation, Vec3::ZERO);
        assert_eq!(trans_b.translation, Vec3::new(59.5, 0.0, 0.0));
    }
}
