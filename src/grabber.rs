//! Mouse interaction: grab a ball, pull it toward the cursor, and feed the
//! grab/release pair to the gesture analyzer.

use bevy::prelude::*;

use crate::{
    components::PendulumBody,
    cradle::world_to_scene,
    gesture::GestureAnalyzer,
    resources::Config,
};

pub struct GrabberPlugin;

impl Plugin for GrabberPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Grabbed>()
            .add_state::<GrabState>()
            .add_system(handle_grab_none.in_set(OnUpdate(GrabState::None)))
            .add_system(handle_grab_start.in_schedule(OnEnter(GrabState::Moving)))
            .add_system(handle_grab_move.in_set(OnUpdate(GrabState::Moving)))
            .add_system(handle_grab_end.in_schedule(OnExit(GrabState::Moving)))
            .register_type::<Grabbed>();
    }
}

#[derive(Reflect, Resource)]
#[reflect(Resource)]
pub struct Grabbed {
    pub entity: Option<Entity>,
    pub mouse_grab: MouseButton,
}

impl Default for Grabbed {
    fn default() -> Self {
        Self {
            entity: None,
            mouse_grab: MouseButton::Left,
        }
    }
}

#[derive(States, PartialEq, Eq, Debug, Clone, Hash, Default)]
pub enum GrabState {
    #[default]
    None,
    Moving,
}

fn cursor_world_position(
    window_query: &Query<&Window>,
    camera_query: &Query<(&GlobalTransform, &Camera)>,
) -> Option<Vec2> {
    let window = window_query.single();
    let (camera_trans, camera) = camera_query.single();
    let cursor = window.cursor_position()?;
    camera.viewport_to_world_2d(camera_trans, cursor)
}

fn handle_grab_none(
    grabbed: Res<Grabbed>,
    mouse_input: Res<Input<MouseButton>>,
    mut grab_next_state: ResMut<NextState<GrabState>>,
) {
    if mouse_input.just_pressed(grabbed.mouse_grab) {
        grab_next_state.set(GrabState::Moving);
    }
}

fn handle_grab_start(
    mut grabbed: ResMut<Grabbed>,
    mut analyzer: ResMut<GestureAnalyzer>,
    time: Res<Time>,
    window_query: Query<&Window>,
    camera_query: Query<(&GlobalTransform, &Camera)>,
    mut bodies: Query<(Entity, &Transform, &mut PendulumBody)>,
    mut grab_next_state: ResMut<NextState<GrabState>>,
) {
    let point = match cursor_world_position(&window_query, &camera_query) {
        Some(point) => point,
        None => {
            grab_next_state.set(GrabState::None);
            return;
        }
    };

    // Pick the ball whose circle contains the cursor, nearest center wins.
    let mut closest = f32::MAX;
    let mut closest_entity = None;
    for (e, trans, body) in bodies.iter() {
        let d = trans.translation.truncate().distance(point);
        if d <= body.radius && d < closest {
            closest = d;
            closest_entity = Some(e);
        }
    }

    match closest_entity {
        Some(entity) => {
            grabbed.entity = Some(entity);
            let (_, trans, mut body) = bodies.get_mut(entity).unwrap();
            body.velocity = Vec2::ZERO;
            analyzer.on_drag_start(
                world_to_scene(point),
                world_to_scene(trans.translation.truncate()),
                time.elapsed_seconds_f64(),
            );
        }
        None => {
            // Pressed empty space, no session opens.
            grabbed.entity = None;
            grab_next_state.set(GrabState::None);
        }
    }
}

fn handle_grab_move(
    grabbed: Res<Grabbed>,
    mouse_input: Res<Input<MouseButton>>,
    config: Res<Config>,
    time: Res<Time>,
    window_query: Query<&Window>,
    camera_query: Query<(&GlobalTransform, &Camera)>,
    mut bodies: Query<(&mut Transform, &mut PendulumBody)>,
    mut grab_next_state: ResMut<NextState<GrabState>>,
) {
    if mouse_input.just_released(grabbed.mouse_grab) || grabbed.entity.is_none() {
        grab_next_state.set(GrabState::None);
        return;
    }

    let point = match cursor_world_position(&window_query, &camera_query) {
        Some(point) => point,
        None => return,
    };

    if let Ok((mut trans, mut body)) = bodies.get_mut(grabbed.entity.unwrap()) {
        // Soft pull toward the cursor, like a spring with the configured
        // stiffness. The arm constraint still applies during the drag.
        let delta = (point - trans.translation.truncate()) * config.mouse_stiffness;
        trans.translation += delta.extend(0.0);
        if time.delta_seconds() > 0.0 {
            body.velocity = delta / time.delta_seconds();
        }
    }
}

fn handle_grab_end(
    mut grabbed: ResMut<Grabbed>,
    mut analyzer: ResMut<GestureAnalyzer>,
    time: Res<Time>,
    window_query: Query<&Window>,
    camera_query: Query<(&GlobalTransform, &Camera)>,
) {
    grabbed.entity = None;

    // Release with no open session (press over empty space) is a no-op
    // inside the analyzer.
    if let Some(point) = cursor_world_position(&window_query, &camera_query) {
        if let Some(readout) =
            analyzer.on_drag_end(world_to_scene(point), time.elapsed_seconds_f64())
        {
            info!(
                "Released: angle {:.2} degrees, force {:.2} N",
                readout.angle, readout.force
            );
        }
    }
}
