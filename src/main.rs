use bevy::prelude::*;
use mindsim_core::SimConfig;
use mindsim_render::MindRenderPlugin;
use mindsim_sim::{MindScene, SimulationPlugin};
use std::path::Path;

/// Config from the first CLI argument, falling back to the built-in mind preset
fn load_config() -> SimConfig {
    let Some(path) = std::env::args().nth(1) else {
        return SimConfig::mind();
    };
    match SimConfig::load(Path::new(&path)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Could not load {}: {}. Using defaults.", path, err);
            SimConfig::mind()
        }
    }
}

fn build_scene(config: SimConfig) -> MindScene {
    let scene = MindScene::new(config).and_then(|mut scene| {
        scene.create_mind("Mind A", mindsim_core::Vec3::new(-1.4, 0.0, 0.0), 1.0)?;
        scene.create_mind("Mind B", mindsim_core::Vec3::new(1.4, 0.0, 0.0), 0.7)?;
        Ok(scene)
    });
    match scene {
        Ok(scene) => scene,
        Err(err) => {
            eprintln!("Invalid config: {}. Using defaults.", err);
            build_scene(SimConfig::mind())
        }
    }
}

fn main() {
    let scene = build_scene(load_config());

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Mind Simulation".into(),
                resolution: (1600.0, 900.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.05)))
        .insert_resource(scene)
        .add_plugins(SimulationPlugin)
        .add_plugins(MindRenderPlugin)
        .run();
}
