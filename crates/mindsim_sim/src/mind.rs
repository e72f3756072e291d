use bevy::log::info;
use bevy::prelude::Resource;
use mindsim_core::{Body, BodyId, ConfigError, MAX_TIME_SCALE, SimConfig, Vec3};
use std::collections::HashMap;

use super::container::Container;

/// Identifies a mind within a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MindId(pub u64);

/// Display data attached to a mental body
#[derive(Debug, Clone, PartialEq)]
pub struct Mental {
    pub name: String,
    pub color: [f32; 4],
}

/// Colors handed out to new mentals, in order
const MENTAL_PALETTE: [[f32; 4]; 8] = [
    [1.0, 0.45, 0.35, 1.0], // Coral
    [0.35, 0.75, 1.0, 1.0], // Sky
    [0.55, 1.0, 0.45, 1.0], // Lime
    [1.0, 0.85, 0.3, 1.0],  // Amber
    [0.8, 0.5, 1.0, 1.0],   // Violet
    [0.3, 1.0, 0.85, 1.0],  // Teal
    [1.0, 0.5, 0.8, 1.0],   // Pink
    [0.9, 0.9, 0.9, 1.0],   // Pale
];

/// Translucent shell tints for minds, picked by id
const MIND_PALETTE: [[f32; 4]; 4] = [
    [0.8, 0.9, 1.0, 0.08],
    [1.0, 0.85, 0.7, 0.08],
    [0.8, 1.0, 0.85, 0.08],
    [0.95, 0.8, 1.0, 0.08],
];

/// A mind: a unit boundary sphere placed in the world at `position` and scaled by
/// its own scale, with mentals drifting inside it in mind-local coordinates.
pub struct Mind {
    pub id: MindId,
    pub name: String,
    /// Shell tint, RGBA
    pub color: [f32; 4],
    /// World-space center of the mind
    pub position: Vec3,
    container: Container,
    mentals: HashMap<BodyId, Mental>,
    colors_used: usize,
}

impl Mind {
    /// Build a mind from a config. The config's boundary becomes the mind's local
    /// sphere, `scale` its frame scale, and `config.initial_bodies` mentals are added.
    pub fn new(
        id: MindId,
        name: impl Into<String>,
        position: Vec3,
        scale: f32,
        config: &SimConfig,
    ) -> Result<Self, ConfigError> {
        let local = SimConfig {
            scale_factor: scale,
            initial_bodies: 0,
            seed: config.seed.wrapping_add(id.0.wrapping_mul(7919)),
            ..config.clone()
        };
        let container = Container::from_config(&local)?;

        let mut mind = Self {
            id,
            name: name.into(),
            color: MIND_PALETTE[id.0 as usize % MIND_PALETTE.len()],
            position,
            container,
            mentals: HashMap::new(),
            colors_used: 0,
        };

        for n in 0..config.initial_bodies {
            mind.add_mental(format!("Mental {}", n + 1));
        }

        info!(
            "Created mind {} '{}' at {:?} (scale {:.2}, {} mentals)",
            mind.id.0,
            mind.name,
            mind.position.to_array(),
            mind.scale(),
            mind.mental_count()
        );

        Ok(mind)
    }

    pub fn scale(&self) -> f32 {
        self.container.boundary.scale_factor
    }

    /// Rescale the mind; its mentals stay inside the new world-space boundary
    pub fn set_scale(&mut self, scale: f32) {
        self.container.set_scale_factor(scale);
        info!("Mind {} rescaled to {:.2}", self.id.0, self.container.boundary.scale());
    }

    /// World-space radius of the mind's boundary sphere
    pub fn world_radius(&self) -> f32 {
        self.container.boundary.world_radius()
    }

    /// Add a mental at a random spot inside the mind
    pub fn add_mental(&mut self, name: impl Into<String>) -> BodyId {
        let id = self.container.spawn_default();
        self.attach(id, name.into());
        id
    }

    /// Add a mental with a caller-chosen body. It is clamped into the mind like any other.
    pub fn add_mental_body(&mut self, name: impl Into<String>, body: Body) -> BodyId {
        let id = self.container.add(body);
        self.attach(id, name.into());
        id
    }

    /// Body with the mind's default mental radius and cruise speed
    pub fn create_mental_body(&mut self, position: Vec3, velocity: Option<Vec3>) -> Body {
        self.container.create_default_body(position, velocity)
    }

    fn attach(&mut self, id: BodyId, name: String) {
        let color = MENTAL_PALETTE[self.colors_used % MENTAL_PALETTE.len()];
        self.colors_used += 1;
        self.mentals.insert(id, Mental { name, color });
    }

    pub fn add_mentals<I, S>(&mut self, names: I) -> Vec<BodyId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(|name| self.add_mental(name)).collect()
    }

    pub fn remove_mental(&mut self, id: BodyId) -> Option<Mental> {
        self.container.remove(id)?;
        self.mentals.remove(&id)
    }

    /// Remove several mentals; unknown ids are skipped. Returns how many went.
    pub fn remove_mentals(&mut self, ids: &[BodyId]) -> usize {
        ids.iter()
            .filter(|&&id| self.remove_mental(id).is_some())
            .count()
    }

    pub fn mental(&self, id: BodyId) -> Option<&Mental> {
        self.mentals.get(&id)
    }

    /// Mentals in simulation order with their bodies
    pub fn mentals(&self) -> impl Iterator<Item = (BodyId, &Body, Option<&Mental>)> {
        self.container
            .iter()
            .map(|(id, body)| (id, body, self.mentals.get(&id)))
    }

    pub fn mental_count(&self) -> usize {
        self.container.len()
    }

    /// Newest mental still in the mind
    pub fn last_mental(&self) -> Option<BodyId> {
        self.container.ids().last().copied()
    }

    /// Mind-local position mapped to world space
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.position + self.container.boundary.to_world(local)
    }

    pub fn world_position(&self, id: BodyId) -> Option<Vec3> {
        self.container.body(id).map(|b| self.to_world(b.position))
    }

    pub fn world_body_radius(&self, id: BodyId) -> Option<f32> {
        self.container
            .body(id)
            .map(|b| b.radius * self.container.boundary.scale())
    }

    pub fn tick(&mut self, dt: f32) {
        self.container.step(dt);
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Remove every mental, keeping the mind itself
    pub fn clear_mentals(&mut self) {
        self.container.clear();
        self.mentals.clear();
    }
}

/// Every mind in the running scene, stepped once per frame
#[derive(Resource)]
pub struct MindScene {
    pub minds: Vec<Mind>,
    pub config: SimConfig,
    /// Whether simulation is paused
    pub paused: bool,
    /// Time multiplier; values above 1 are split into sub-steps
    pub time_scale: f32,
    /// Frames advanced so far
    pub frame: u64,
    next_mind_id: u64,
}

impl MindScene {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            minds: Vec::new(),
            config,
            paused: false,
            time_scale: 1.0,
            frame: 0,
            next_mind_id: 1,
        })
    }

    pub fn create_mind(
        &mut self,
        name: impl Into<String>,
        position: Vec3,
        scale: f32,
    ) -> Result<MindId, ConfigError> {
        let id = MindId(self.next_mind_id);
        let mind = Mind::new(id, name, position, scale, &self.config)?;
        self.next_mind_id += 1;
        self.minds.push(mind);
        Ok(id)
    }

    pub fn remove_mind(&mut self, id: MindId) -> Option<Mind> {
        let index = self.minds.iter().position(|m| m.id == id)?;
        Some(self.minds.remove(index))
    }

    pub fn mind(&self, id: MindId) -> Option<&Mind> {
        self.minds.iter().find(|m| m.id == id)
    }

    pub fn mind_mut(&mut self, id: MindId) -> Option<&mut Mind> {
        self.minds.iter_mut().find(|m| m.id == id)
    }

    /// Advance every mind by one frame
    pub fn tick(&mut self, dt: f32) {
        if self.paused {
            return;
        }

        let time_scale = if self.time_scale.is_finite() {
            self.time_scale.clamp(0.0, MAX_TIME_SCALE)
        } else {
            1.0
        };
        let substeps = time_scale.ceil().max(1.0) as u32;
        let sub_dt = dt * time_scale / substeps as f32;

        for mind in self.minds.iter_mut() {
            for _ in 0..substeps {
                mind.tick(sub_dt);
            }
        }
        self.frame += 1;
    }

    pub fn mental_count(&self) -> usize {
        self.minds.iter().map(Mind::mental_count).sum()
    }
}
