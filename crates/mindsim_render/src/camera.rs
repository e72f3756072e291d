use bevy::prelude::*;

/// Marker for the viewer camera
#[derive(Component)]
pub struct ViewCamera;

/// Fixed camera framing the scene origin, plus a key light
pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 2.0, 6.5).looking_at(Vec3::ZERO, Vec3::Y),
        ViewCamera,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_xyz(3.0, 6.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
    });
}
