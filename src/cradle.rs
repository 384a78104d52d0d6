//! Cradle construction: placement math, validation, and spawning.
//!
//! All layout math lives in the scene frame (pixels, y down, top-left
//! origin); `scene_to_world` converts at the ECS boundary.

use core::fmt;

use bevy::{prelude::*, sprite::MaterialMesh2dBundle};

use crate::{components::*, resources::Config};

pub const SCENE_WIDTH: f32 = 800.0;
pub const SCENE_HEIGHT: f32 = 600.0;

/// Horizontal spacing between neighboring balls, in ball radii.
pub const SEPARATION: f32 = 1.9;
/// Contact slop as a fraction of the ball radius.
pub const SLOP_FACTOR: f32 = 0.02;
/// Scene-frame offset applied to ball 0 so the cradle starts swinging.
pub const INITIAL_KICK: Vec2 = Vec2::new(-180.0, -100.0);

/// Errors raised for invalid placement parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum CradleError {
    /// At least one ball is required.
    InvalidCount,
    /// Radius must be positive and finite.
    InvalidRadius(f32),
    /// Arm length must be non-negative and finite.
    InvalidArmLength(f32),
}

impl fmt::Display for CradleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CradleError::InvalidCount => write!(f, "cradle needs at least one ball"),
            CradleError::InvalidRadius(r) => {
                write!(f, "ball radius must be positive and finite, got {}", r)
            }
            CradleError::InvalidArmLength(l) => {
                write!(f, "arm length must be non-negative and finite, got {}", l)
            }
        }
    }
}

impl std::error::Error for CradleError {}

/// One ball's placement: its pivot anchor, its resting center, and where it
/// actually spawns (ball 0 starts displaced by `INITIAL_KICK`).
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub anchor: Vec2,
    pub rest: Vec2,
    pub position: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CradleLayout {
    pub placements: Vec<Placement>,
    pub arm_length: f32,
}

/// Place `count` balls in a row below their anchors. Each anchor sits
/// directly above its ball's resting center, so every ball swings in a
/// vertical plane.
pub fn build(
    origin: Vec2,
    count: u32,
    radius: f32,
    arm_length: f32,
) -> Result<CradleLayout, CradleError> {
    if count == 0 {
        return Err(CradleError::InvalidCount);
    }
    if !(radius > 0.0) || !radius.is_finite() {
        return Err(CradleError::InvalidRadius(radius));
    }
    if arm_length < 0.0 || !arm_length.is_finite() {
        return Err(CradleError::InvalidArmLength(arm_length));
    }

    let mut placements = Vec::with_capacity(count as usize);
    for i in 0..count {
        let x = origin.x + i as f32 * radius * SEPARATION;
        let rest = Vec2::new(x, origin.y + arm_length);
        let position = if i == 0 { rest + INITIAL_KICK } else { rest };
        placements.push(Placement {
            anchor: Vec2::new(x, origin.y),
            rest,
            position,
            radius,
        });
    }

    Ok(CradleLayout {
        placements,
        arm_length,
    })
}

pub fn scene_to_world(p: Vec2) -> Vec2 {
    Vec2::new(p.x - SCENE_WIDTH * 0.5, SCENE_HEIGHT * 0.5 - p.y)
}

pub fn world_to_scene(p: Vec2) -> Vec2 {
    Vec2::new(p.x + SCENE_WIDTH * 0.5, SCENE_HEIGHT * 0.5 - p.y)
}

pub fn spawn_cradle(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    config: Res<Config>,
) {
    let layout = match build(
        config.origin,
        config.ball_count,
        config.ball_radius,
        config.arm_length,
    ) {
        Ok(layout) => layout,
        Err(err) => {
            warn!("Cradle rejected: {}", err);
            return;
        }
    };

    for (i, placement) in layout.placements.iter().enumerate() {
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: meshes.add(shape::Circle::new(placement.radius).into()).into(),
                material: materials.add(ColorMaterial::from(Color::SILVER)),
                transform: Transform::from_translation(
                    scene_to_world(placement.position).extend(0.0),
                ),
                ..Default::default()
            },
            PendulumBody {
                radius: placement.radius,
                mass: 1.0,
                restitution: 1.0,
                slop: placement.radius * SLOP_FACTOR,
                prev_position: scene_to_world(placement.position),
                ..default()
            },
            PivotArm {
                anchor: scene_to_world(placement.anchor),
                length: layout.arm_length,
            },
            Name::new(format!("Ball {}", i)),
        ));
    }

    info!("Spawned cradle with {} balls", layout.placements.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_places_one_anchor_above_each_ball() {
        let layout = build(Vec2::new(280.0, 100.0), 5, 30.0, 200.0).unwrap();

        assert_eq!(layout.placements.len(), 5);
        for (i, p) in layout.placements.iter().enumerate() {
            assert_eq!(
                p.anchor.x, p.rest.x,
                "Ball {} should rest directly below its anchor",
                i
            );
            assert_eq!(p.anchor.y, 100.0);
            assert_eq!(p.rest.y, 300.0);
        }

        // Neighbors sit 1.9 radii apart.
        let dx = layout.placements[1].rest.x - layout.placements[0].rest.x;
        assert!((dx - 57.0).abs() < 1e-4, "Expected 57px spacing, got {}", dx);
    }

    #[test]
    fn first_ball_spawns_kicked_from_rest() {
        let layout = build(Vec2::new(280.0, 100.0), 5, 30.0, 200.0).unwrap();

        let first = &layout.placements[0];
        assert_eq!(first.position, first.rest + Vec2::new(-180.0, -100.0));
        for p in &layout.placements[1..] {
            assert_eq!(p.position, p.rest);
        }
    }

    #[test]
    fn build_rejects_bad_parameters() {
        assert_eq!(
            build(Vec2::ZERO, 0, 30.0, 200.0),
            Err(CradleError::InvalidCount)
        );
        assert_eq!(
            build(Vec2::ZERO, 5, 0.0, 200.0),
            Err(CradleError::InvalidRadius(0.0))
        );
        assert_eq!(
            build(Vec2::ZERO, 5, -1.0, 200.0),
            Err(CradleError::InvalidRadius(-1.0))
        );
        assert_eq!(
            build(Vec2::ZERO, 5, 30.0, -0.5),
            Err(CradleError::InvalidArmLength(-0.5))
        );
    }

    #[test]
    fn zero_arm_length_is_allowed() {
        let layout = build(Vec2::new(100.0, 100.0), 1, 10.0, 0.0).unwrap();
        assert_eq!(layout.placements[0].rest, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn scene_world_round_trip() {
        let p = Vec2::new(280.0, 100.0);
        assert_eq!(world_to_scene(scene_to_world(p)), p);
        // Scene y grows downward, world y upward.
        assert_eq!(scene_to_world(Vec2::new(400.0, 300.0)), Vec2::ZERO);
        assert_eq!(scene_to_world(Vec2::new(400.0, 0.0)), Vec2::new(0.0, 300.0));
    }
}
