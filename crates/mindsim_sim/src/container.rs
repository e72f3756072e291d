use bevy::log::{debug, info, warn};
use mindsim_core::{Body, BodyId, Boundary, ConfigError, SimConfig, SpeedPolicy, Vec3};
use mindsim_physics::{contain, create_body, diagnostics, random_point_in_sphere, step};
use mindsim_physics::{StepParams, StepReport};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A spherical boundary and the bodies drifting inside it.
///
/// Bodies are kept in insertion order, which is also the pair-iteration order of
/// the collision pass, so a container built the same way with the same seed
/// replays the same trajectories. The random source is injected through `R`.
pub struct Container<R: Rng = ChaCha8Rng> {
    /// Owned boundary. The scene may rescale it at any time; every step re-reads it.
    pub boundary: Boundary,
    params: StepParams,
    max_dt: f32,
    placement_attempts: u32,
    body_radius: f32,
    cruise_speed: f32,
    ids: Vec<BodyId>,
    bodies: Vec<Body>,
    next_id: u64,
    rng: R,
    steps: u64,
    last_report: StepReport,
}

impl Container<ChaCha8Rng> {
    /// Build from a config, seeding the generator from `config.seed` and spawning
    /// `config.initial_bodies` bodies at random positions.
    pub fn from_config(config: &SimConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(config.seed))
    }
}

impl<R: Rng> Container<R> {
    pub fn with_rng(config: &SimConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut container = Self {
            boundary: config.boundary(),
            params: StepParams::from_config(config),
            max_dt: config.max_dt,
            placement_attempts: config.placement_attempts,
            body_radius: config.body_radius,
            cruise_speed: config.cruise_speed,
            ids: Vec::with_capacity(config.initial_bodies as usize),
            bodies: Vec::with_capacity(config.initial_bodies as usize),
            next_id: 0,
            rng,
            steps: 0,
            last_report: StepReport::default(),
        };

        for _ in 0..config.initial_bodies {
            container.spawn_default();
        }

        info!(
            "Container ready: radius {:.3} x{:.3}, {} bodies, {} policy",
            container.boundary.radius,
            container.boundary.scale_factor,
            container.len(),
            container.params.policy.name()
        );

        Ok(container)
    }

    /// Insert a body, clamping it inside the boundary straight away
    pub fn add(&mut self, mut body: Body) -> BodyId {
        contain(
            &mut body,
            &self.boundary,
            self.params.restitution,
            &self.params.policy,
            &mut self.rng,
        );

        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.ids.push(id);
        self.bodies.push(body);

        debug!("Added body {:?} at {:?}", id, body.position);
        id
    }

    /// Build a body using this container's random source for the seeded velocity
    pub fn create_body(
        &mut self,
        position: Vec3,
        radius: f32,
        cruise_speed: f32,
        initial_velocity: Option<Vec3>,
    ) -> Body {
        create_body(position, radius, cruise_speed, initial_velocity, &mut self.rng)
    }

    /// Random local position where a body of `radius` fits
    pub fn random_position(&mut self, radius: f32) -> Vec3 {
        let limit = self.boundary.local_limit(radius);
        match random_point_in_sphere(limit, self.placement_attempts, &mut self.rng) {
            Some(p) => p,
            None => {
                warn!(
                    "Random placement gave up after {} attempts, using the center",
                    self.placement_attempts
                );
                Vec3::ZERO
            }
        }
    }

    /// Body at `position` with the configured radius and cruise speed
    pub fn create_default_body(&mut self, position: Vec3, initial_velocity: Option<Vec3>) -> Body {
        self.create_body(position, self.body_radius, self.cruise_speed, initial_velocity)
    }

    /// Place a new body at a random spot and add it
    pub fn spawn(&mut self, radius: f32, cruise_speed: f32, initial_velocity: Option<Vec3>) -> BodyId {
        let position = self.random_position(radius);
        let body = self.create_body(position, radius, cruise_speed, initial_velocity);
        self.add(body)
    }

    /// `spawn` with the configured body radius and cruise speed
    pub fn spawn_default(&mut self) -> BodyId {
        self.spawn(self.body_radius, self.cruise_speed, None)
    }

    /// Remove a body, keeping the order of the rest
    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        let index = self.index_of(id)?;
        self.ids.remove(index);
        let body = self.bodies.remove(index);
        debug!("Removed body {:?}", id);
        Some(body)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.bodies.clear();
    }

    /// Advance one frame. `dt` is clamped to the configured maximum; a negative or
    /// non-finite `dt` advances nothing.
    pub fn step(&mut self, dt: f32) {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt.min(self.max_dt)
        } else {
            warn!("Ignoring frame delta {}", dt);
            0.0
        };

        self.last_report = step(
            &mut self.bodies,
            &self.boundary,
            &self.params,
            dt,
            &mut self.rng,
        );
        self.steps += 1;
    }

    /// Rescale the owning frame. Bodies are re-clamped right away.
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.boundary.scale_factor = scale_factor;
        self.reclamp_all();
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.boundary.radius = radius;
        self.reclamp_all();
    }

    /// Pull every body back inside the current boundary
    pub fn reclamp_all(&mut self) -> usize {
        let mut clamped = 0;
        for body in self.bodies.iter_mut() {
            let result = contain(
                body,
                &self.boundary,
                self.params.restitution,
                &self.params.policy,
                &mut self.rng,
            );
            if result.touched_wall() {
                clamped += 1;
            }
        }
        clamped
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        self.ids.iter().position(|&other| other == id)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.index_of(id).map(|i| &self.bodies[i])
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn ids(&self) -> &[BodyId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.ids.iter().copied().zip(self.bodies.iter())
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn policy(&self) -> &SpeedPolicy {
        &self.params.policy
    }

    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }

    pub fn step_count(&self) -> u64 {
        self.steps
    }

    pub fn last_report(&self) -> &StepReport {
        &self.last_report
    }

    pub fn kinetic_energy(&self) -> f64 {
        diagnostics::kinetic_energy(&self.bodies)
    }

    /// Worst wall penetration in world units, clamped at zero
    pub fn max_containment_violation(&self) -> f32 {
        diagnostics::max_penetration(&self.bodies, &self.boundary).max(0.0)
    }

    pub fn max_speed_error(&self) -> f32 {
        diagnostics::max_speed_error(&self.bodies, &self.params.policy)
    }

    pub fn max_overlap(&self) -> f32 {
        diagnostics::max_overlap(&self.bodies)
    }
}
