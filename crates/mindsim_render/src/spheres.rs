use bevy::prelude::*;
use mindsim_core::BodyId;
use mindsim_sim::{MindId, MindScene};
use std::collections::{HashMap, HashSet};

/// Translucent boundary sphere of a mind
#[derive(Component)]
pub struct MindShell {
    pub mind: MindId,
}

/// Render entity mirroring one mental body
#[derive(Component)]
pub struct MentalSphere {
    pub mind: MindId,
    pub body: BodyId,
}

/// Shared unit-sphere mesh and per-color materials
#[derive(Resource)]
pub struct SphereAssets {
    mesh: Handle<Mesh>,
    shells: HashMap<[u32; 4], Handle<StandardMaterial>>,
    by_color: HashMap<[u32; 4], Handle<StandardMaterial>>,
}

impl SphereAssets {
    fn material_for(
        &mut self,
        color: [f32; 4],
        materials: &mut Assets<StandardMaterial>,
    ) -> Handle<StandardMaterial> {
        let key = color.map(f32::to_bits);
        self.by_color
            .entry(key)
            .or_insert_with(|| {
                let base = Color::srgba(color[0], color[1], color[2], color[3]);
                materials.add(StandardMaterial {
                    base_color: base,
                    emissive: LinearRgba::from(base) * 0.6,
                    ..default()
                })
            })
            .clone()
    }

    /// Unlit see-through material for a mind's boundary
    fn shell_for(
        &mut self,
        color: [f32; 4],
        materials: &mut Assets<StandardMaterial>,
    ) -> Handle<StandardMaterial> {
        let key = color.map(f32::to_bits);
        self.shells
            .entry(key)
            .or_insert_with(|| {
                materials.add(StandardMaterial {
                    base_color: Color::srgba(color[0], color[1], color[2], color[3]),
                    alpha_mode: AlphaMode::Blend,
                    unlit: true,
                    double_sided: true,
                    cull_mode: None,
                    ..default()
                })
            })
            .clone()
    }
}

pub fn init_sphere_assets(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let mesh = meshes.add(Sphere::new(1.0).mesh().uv(32, 18));
    commands.insert_resource(SphereAssets {
        mesh,
        shells: HashMap::new(),
        by_color: HashMap::new(),
    });
}

fn to_render(v: mindsim_core::Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Mirror the scene into render entities: spawn what's new, move what exists,
/// despawn what was removed. Simulation state is only read here, never written.
pub fn sync_sphere_visuals(
    mut commands: Commands,
    scene: Res<MindScene>,
    mut assets: ResMut<SphereAssets>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut shells: Query<(Entity, &MindShell, &mut Transform), Without<MentalSphere>>,
    mut mentals: Query<(Entity, &MentalSphere, &mut Transform), Without<MindShell>>,
) {
    let mut seen_minds = HashSet::new();
    for (entity, shell, mut transform) in shells.iter_mut() {
        match scene.mind(shell.mind) {
            Some(mind) => {
                transform.translation = to_render(mind.position);
                transform.scale = Vec3::splat(mind.world_radius());
                seen_minds.insert(shell.mind);
            }
            None => commands.entity(entity).despawn(),
        }
    }

    let mut seen_bodies = HashSet::new();
    for (entity, sphere, mut transform) in mentals.iter_mut() {
        let placed = scene.mind(sphere.mind).and_then(|mind| {
            Some((
                mind.world_position(sphere.body)?,
                mind.world_body_radius(sphere.body)?,
            ))
        });
        match placed {
            Some((position, radius)) => {
                transform.translation = to_render(position);
                transform.scale = Vec3::splat(radius);
                seen_bodies.insert((sphere.mind, sphere.body));
            }
            None => commands.entity(entity).despawn(),
        }
    }

    for mind in &scene.minds {
        if !seen_minds.contains(&mind.id) {
            let shell = assets.shell_for(mind.color, &mut materials);
            commands.spawn((
                Mesh3d(assets.mesh.clone()),
                MeshMaterial3d(shell),
                Transform::from_translation(to_render(mind.position))
                    .with_scale(Vec3::splat(mind.world_radius())),
                MindShell { mind: mind.id },
            ));
        }

        for (id, body, mental) in mind.mentals() {
            if seen_bodies.contains(&(mind.id, id)) {
                continue;
            }
            let color = mental.map_or([1.0; 4], |m| m.color);
            let material = assets.material_for(color, &mut materials);
            let radius = body.radius * mind.container().boundary.scale();
            commands.spawn((
                Mesh3d(assets.mesh.clone()),
                MeshMaterial3d(material),
                Transform::from_translation(to_render(mind.to_world(body.position)))
                    .with_scale(Vec3::splat(radius)),
                MentalSphere {
                    mind: mind.id,
                    body: id,
                },
            ));
        }
    }
}
