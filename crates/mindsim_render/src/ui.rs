use bevy::prelude::*;
use mindsim_sim::MindScene;

/// Marker for the HUD text
#[derive(Component)]
pub struct HudText;

/// Mind that keyboard edits apply to, as an index into `MindScene::minds`
#[derive(Resource, Default)]
pub struct Selection {
    pub index: usize,
}

/// HUD frame counter for throttling
#[derive(Resource, Default)]
pub struct HudThrottle {
    pub frame: u32,
}

const SCALE_STEP: f32 = 1.1;

pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Text::new("Mind Simulation"),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgba(0.85, 0.9, 1.0, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        HudText,
    ));
}

/// Update HUD text every 10th frame
pub fn update_hud(
    scene: Res<MindScene>,
    selection: Res<Selection>,
    mut throttle: ResMut<HudThrottle>,
    mut query: Query<&mut Text, With<HudText>>,
) {
    throttle.frame = throttle.frame.wrapping_add(1);
    if throttle.frame % 10 != 0 {
        return;
    }

    let Ok(mut text) = query.get_single_mut() else {
        return;
    };

    let paused = if scene.paused { " [PAUSED]" } else { "" };
    let mut out = format!(
        "Frame {}  x{:.0}{}\nMinds: {}  Mentals: {}\n",
        scene.frame,
        scene.time_scale,
        paused,
        scene.minds.len(),
        scene.mental_count(),
    );

    for (i, mind) in scene.minds.iter().enumerate() {
        let marker = if i == selection.index { ">" } else { " " };
        let container = mind.container();
        let report = container.last_report();
        out.push_str(&format!(
            "{} {}  scale {:.2}  mentals {}  walls {}  hits {}  err {:.1e}\n",
            marker,
            mind.name,
            mind.scale(),
            mind.mental_count(),
            report.wall_contacts,
            report.impulses,
            container.max_containment_violation(),
        ));
    }

    out.push_str("\n[Space] Pause  [1-3] Speed  [Tab] Select\n");
    out.push_str("[N] Add mental  [Backspace] Remove newest  [Up/Down] Scale");
    **text = out;
}

/// Keyboard controls for time and for editing the selected mind
pub fn control_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut scene: ResMut<MindScene>,
    mut selection: ResMut<Selection>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        scene.paused = !scene.paused;
        info!("Simulation {}", if scene.paused { "paused" } else { "resumed" });
    }
    if keyboard.just_pressed(KeyCode::Digit1) {
        scene.time_scale = 1.0;
    }
    if keyboard.just_pressed(KeyCode::Digit2) {
        scene.time_scale = 2.0;
    }
    if keyboard.just_pressed(KeyCode::Digit3) {
        scene.time_scale = 4.0;
    }

    if scene.minds.is_empty() {
        return;
    }
    if keyboard.just_pressed(KeyCode::Tab) {
        selection.index = (selection.index + 1) % scene.minds.len();
    }
    let index = selection.index.min(scene.minds.len() - 1);
    let mind = &mut scene.minds[index];

    if keyboard.just_pressed(KeyCode::KeyN) {
        let name = format!("Mental {}", mind.mental_count() + 1);
        let id = mind.add_mental(name);
        info!("Added mental {} to '{}'", id.0, mind.name);
    }
    if keyboard.just_pressed(KeyCode::Backspace) {
        if let Some(id) = mind.last_mental() {
            mind.remove_mental(id);
        }
    }
    if keyboard.just_pressed(KeyCode::ArrowUp) {
        let scale = mind.scale() * SCALE_STEP;
        mind.set_scale(scale);
    }
    if keyboard.just_pressed(KeyCode::ArrowDown) {
        let scale = mind.scale() / SCALE_STEP;
        mind.set_scale(scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindsim_core::{SimConfig, Vec3};

    fn app_with_scene() -> App {
        let mut scene = MindScene::new(SimConfig::mind()).unwrap();
        scene.create_mind("Test", Vec3::ZERO, 1.0).unwrap();

        let mut app = App::new();
        app.insert_resource(scene)
            .init_resource::<Selection>()
            .init_resource::<ButtonInput<KeyCode>>()
            .add_systems(Update, control_system);
        app
    }

    fn press(app: &mut App, key: KeyCode) {
        {
            let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            input.release_all();
            input.clear();
            input.press(key);
        }
        app.update();
    }

    #[test]
    fn test_space_toggles_pause() {
        let mut app = app_with_scene();
        press(&mut app, KeyCode::Space);
        assert!(app.world().resource::<MindScene>().paused);
    }

    #[test]
    fn test_add_and_remove_mental_keys() {
        let mut app = app_with_scene();
        let before = app.world().resource::<MindScene>().mental_count();

        press(&mut app, KeyCode::KeyN);
        assert_eq!(app.world().resource::<MindScene>().mental_count(), before + 1);

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.world().resource::<MindScene>().mental_count(), before - 1);
    }

    #[test]
    fn test_scale_keys_keep_mentals_inside() {
        let mut app = app_with_scene();
        press(&mut app, KeyCode::ArrowDown);
        press(&mut app, KeyCode::ArrowDown);

        let scene = app.world().resource::<MindScene>();
        let mind = &scene.minds[0];
        assert!((mind.scale() - 1.0 / (SCALE_STEP * SCALE_STEP)).abs() < 1e-5);
        assert!(mind.container().max_containment_violation() <= 1e-4);
    }
}
