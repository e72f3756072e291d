use bevy::prelude::*;

use super::mind::MindScene;

/// Bevy plugin for the simulation pipeline
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, simulation_tick);
    }
}

/// Main simulation tick: one physics step per rendered frame
fn simulation_tick(mut scene: ResMut<MindScene>, time: Res<Time>) {
    let dt = time.delta_secs();
    scene.tick(dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindsim_core::SimConfig;

    #[test]
    fn test_plugin_ticks_scene_each_update() {
        let mut scene = MindScene::new(SimConfig::mind()).unwrap();
        scene
            .create_mind("Test", mindsim_core::Vec3::ZERO, 1.0)
            .unwrap();

        let mut app = App::new();
        app.init_resource::<Time>()
            .insert_resource(scene)
            .add_plugins(SimulationPlugin);

        app.update();
        app.update();

        let scene = app.world().resource::<MindScene>();
        assert_eq!(scene.frame, 2);
        assert_eq!(scene.minds[0].container().step_count(), 2);
    }
}
