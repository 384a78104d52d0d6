//! Angle/force readout rendered as a two-line overlay.

use bevy::prelude::*;

use crate::{gesture::GestureAnalyzer, reset::Keep};

pub struct TextOverlayPlugin;

impl Plugin for TextOverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_startup_system(setup_overlay)
            .add_system(update_readout);
    }
}

#[derive(Component)]
struct AngleText;

#[derive(Component)]
struct ForceText;

const UI_SIZE: f32 = 20.0;

fn readout_line(label: &str, bottom: f32, font: Handle<Font>) -> TextBundle {
    TextBundle {
        style: Style {
            position_type: PositionType::Absolute,
            position: UiRect {
                left: Val::Px(10.),
                bottom: Val::Px(bottom),
                ..Default::default()
            },
            align_self: AlignSelf::FlexEnd,
            ..Default::default()
        },
        text: Text {
            sections: vec![
                TextSection {
                    value: label.to_string(),
                    style: TextStyle {
                        font: font.clone(),
                        font_size: UI_SIZE,
                        color: Color::WHITE,
                    },
                },
                TextSection {
                    value: "".to_string(),
                    style: TextStyle {
                        font,
                        font_size: UI_SIZE,
                        color: Color::GREEN,
                    },
                },
            ],
            ..Default::default()
        },
        ..Default::default()
    }
}

fn setup_overlay(mut commands: Commands, asset_server: Res<AssetServer>) {
    let ui_font = asset_server.load("fonts/FiraSans-Bold.ttf");

    commands.spawn((
        readout_line("Angle: ", 30., ui_font.clone()),
        Name::new("ui Angle"),
        Keep,
        AngleText,
    ));

    commands.spawn((
        readout_line("Force: ", 10., ui_font),
        Name::new("ui Force"),
        Keep,
        ForceText,
    ));
}

fn update_readout(
    analyzer: Res<GestureAnalyzer>,
    mut angle_query: Query<&mut Text, (With<AngleText>, Without<ForceText>)>,
    mut force_query: Query<&mut Text, (With<ForceText>, Without<AngleText>)>,
) {
    let readout = analyzer.readout();
    for mut text in angle_query.iter_mut() {
        text.sections[1].value = format!("{:.2} degrees", readout.angle);
    }
    for mut text in force_query.iter_mut() {
        text.sections[1].value = format!("{:.2} N", readout.force);
    }
}
