mod components;
mod cradle;
mod gesture;
mod grabber;
mod reset;
mod resources;
mod text_overlay;

use components::*;
use cradle::*;
use gesture::*;
use grabber::*;
use reset::*;
use resources::*;
use text_overlay::*;

use bevy::prelude::*;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;
use bevy_prototype_debug_lines::{DebugLines, DebugLinesPlugin};

/// Pixels of line per px/s of velocity when drawing velocity vectors.
const VELOCITY_DRAW_SCALE: f32 = 0.05;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Newton's Cradle Simulation".into(),
                resolution: (SCENE_WIDTH, SCENE_HEIGHT).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .init_resource::<Config>()
        .init_resource::<GestureAnalyzer>()
        .add_plugin(ResourceInspectorPlugin::<Config>::default())
        .add_plugin(DebugLinesPlugin::default())
        .add_plugin(ResetPlugin)
        .add_plugin(GrabberPlugin)
        .add_plugin(TextOverlayPlugin)
        .add_startup_system(setup)
        .add_system(spawn_cradle.in_schedule(OnEnter(ResetState::Playing)))
        .add_systems(
            (simulate, draw_arms, draw_velocities)
                .chain()
                .in_set(OnUpdate(ResetState::Playing)),
        )
        .register_type::<Config>()
        .register_type::<PendulumBody>()
        .register_type::<PivotArm>()
        .register_type::<GestureAnalyzer>()
        .run()
}

fn setup(mut commands: Commands) {
    // Frame the camera on the scene rect (0, 50)..(800, 600), the slice of
    // the scene the demo shows.
    let min = scene_to_world(Vec2::new(0., SCENE_HEIGHT));
    let max = scene_to_world(Vec2::new(SCENE_WIDTH, 50.));
    let center = (min + max) * 0.5;
    let scale = ((max.x - min.x) / SCENE_WIDTH).max((max.y - min.y) / SCENE_HEIGHT);

    commands.spawn((
        Camera2dBundle {
            transform: Transform::from_translation(center.extend(100.)),
            projection: OrthographicProjection {
                scale,
                ..default()
            },
            ..Default::default()
        },
        Keep,
    ));

    info!("Press 'R' to reset, Space to pause");
}

fn simulate(
    mut bodies: Query<(&mut PendulumBody, &PivotArm, &mut Transform)>,
    config: Res<Config>,
    time: Res<Time>,
) {
    if time.delta_seconds() == 0.0 {
        return;
    }

    let sdt = time.delta_seconds() / config.sub_steps as f32;

    for _ in 0..config.sub_steps {
        for (mut body, arm, mut transform) in bodies.iter_mut() {
            body.start_step(&mut transform, sdt, config.gravity);
            body.keep_on_arm(arm, &mut transform);
        }

        for (mut body, _arm, transform) in bodies.iter_mut() {
            body.end_step(&transform, sdt);
        }

        let mut combinations = bodies.iter_combinations_mut();
        while let Some([(mut body_a, _, mut trans_a), (mut body_b, _, mut trans_b)]) =
            combinations.fetch_next()
        {
            resolve_ball_collision(&mut body_a, &mut trans_a, &mut body_b, &mut trans_b);
        }
    }
}

fn draw_arms(
    mut lines: ResMut<DebugLines>,
    query: Query<(&PivotArm, &Transform), With<PendulumBody>>,
) {
    for (arm, transform) in query.iter() {
        lines.line_colored(arm.anchor.extend(0.), transform.translation, 0.0, Color::GRAY);
    }
}

fn draw_velocities(mut lines: ResMut<DebugLines>, query: Query<(&PendulumBody, &Transform)>) {
    for (body, transform) in query.iter() {
        let tip = transform.translation + (body.velocity * VELOCITY_DRAW_SCALE).extend(0.);
        lines.line_colored(transform.translation, tip, 0.0, Color::CYAN);
    }
}
