use bevy::prelude::*;

use super::camera;
use super::spheres;
use super::ui;

/// Viewer plugin: camera, HUD, controls and sphere visuals for a `MindScene`
pub struct MindRenderPlugin;

impl Plugin for MindRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ui::HudThrottle>()
            .init_resource::<ui::Selection>()
            .add_systems(
                Startup,
                (
                    camera::spawn_camera,
                    ui::spawn_hud,
                    spheres::init_sphere_assets,
                ),
            )
            .add_systems(
                Update,
                (
                    ui::control_system,
                    spheres::sync_sphere_visuals.after(ui::control_system),
                    ui::update_hud,
                ),
            );
    }
}
