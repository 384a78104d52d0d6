use bevy::prelude::*;
use bevy_inspector_egui::{prelude::ReflectInspectorOptions, InspectorOptions};

#[derive(Reflect, Resource, InspectorOptions)]
#[reflect(Resource, InspectorOptions)]
pub struct Config {
    /// Top-left anchor of the cradle row, scene pixels (y down).
    pub origin: Vec2,
    #[inspector(min = 1, max = 16)]
    pub ball_count: u32,
    #[inspector(min = 1.0, max = 60.0)]
    pub ball_radius: f32,
    #[inspector(min = 0.0, max = 400.0)]
    pub arm_length: f32,
    #[inspector(min = 1, max = 500)]
    pub sub_steps: u32,
    /// World units (pixels) per second squared.
    pub gravity: Vec2,
    /// Fraction of the cursor offset applied per frame while dragging.
    #[inspector(min = 0.0, max = 1.0)]
    pub mouse_stiffness: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            origin: Vec2::new(280.0, 100.0),
            ball_count: 5,
            ball_radius: 30.0,
            arm_length: 200.0,
            sub_steps: 60,
            gravity: Vec2::new(0.0, -980.0),
            mouse_stiffness: 0.2,
        }
    }
}
