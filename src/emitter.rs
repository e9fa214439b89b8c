use glam::Vec3;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::buffers::AttributeBufferSet;
use crate::random::{
    jitter_color, jitter_vec3, radial_velocity, random_float, random_on_disk, random_on_sphere,
};

/// Emission volume of an emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitterType {
    /// Axis-aligned box jitter around the position.
    Cube,
    /// Shell placement at `radius ± radiusSpread`, outward radial velocity.
    Sphere,
    /// Same as sphere but flattened onto the XY plane.
    Disk,
}

/// Per-particle curve attributes that can be lazily re-sampled after a
/// parameter change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveAttribute {
    SizeStart,
    SizeMiddle,
    SizeEnd,
    ColorStart,
    ColorMiddle,
    ColorEnd,
    OpacityStart,
    OpacityMiddle,
    OpacityEnd,
    AngleStart,
    AngleMiddle,
    AngleEnd,
}

#[derive(Debug, thiserror::Error)]
pub enum EmitterError {
    #[error("particle count must be at least 1 (got {0})")]
    InvalidParticleCount(usize),
}

/// Construction-time parameters for an [`Emitter`].
///
/// All fields are plain data so emitter definitions can be loaded from asset
/// files. Values set here are sampled into the buffers when the emitter is
/// added to a group; later changes go through the validated setters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    pub emitter_type: EmitterType,
    pub particle_count: usize,

    pub position: Vec3,
    pub position_spread: Vec3,

    pub radius: f32,
    pub radius_spread: f32,
    pub radius_scale: Vec3,
    pub radius_spread_clamp: f32,

    pub acceleration: Vec3,
    pub acceleration_spread: Vec3,
    pub velocity: Vec3,
    pub velocity_spread: Vec3,
    pub speed: f32,
    pub speed_spread: f32,

    pub size_start: f32,
    pub size_start_spread: f32,
    pub size_middle: f32,
    pub size_middle_spread: f32,
    pub size_end: f32,
    pub size_end_spread: f32,

    pub opacity_start: f32,
    pub opacity_start_spread: f32,
    pub opacity_middle: f32,
    pub opacity_middle_spread: f32,
    pub opacity_end: f32,
    pub opacity_end_spread: f32,

    pub angle_start: f32,
    pub angle_start_spread: f32,
    pub angle_middle: f32,
    pub angle_middle_spread: f32,
    pub angle_end: f32,
    pub angle_end_spread: f32,

    /// Colors are RGB in `[0, 1]`, stored as vectors.
    pub color_start: Vec3,
    pub color_start_spread: Vec3,
    pub color_middle: Vec3,
    pub color_middle_spread: Vec3,
    pub color_end: Vec3,
    pub color_end_spread: Vec3,

    /// Seconds of emission before the emitter self-terminates. `None` emits
    /// forever.
    pub duration: Option<f32>,
    /// Emitter-level alive scalar. Fractional values throttle the spawn rate.
    pub alive: f32,
    /// Static emitters never age, spawn or recycle; their initial particles
    /// are placed once and left alone.
    pub is_static: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            emitter_type: EmitterType::Cube,
            particle_count: 100,

            position: Vec3::ZERO,
            position_spread: Vec3::ZERO,

            radius: 10.0,
            radius_spread: 0.0,
            radius_scale: Vec3::ONE,
            radius_spread_clamp: 0.0,

            acceleration: Vec3::ZERO,
            acceleration_spread: Vec3::ZERO,
            velocity: Vec3::ZERO,
            velocity_spread: Vec3::ZERO,
            speed: 0.0,
            speed_spread: 0.0,

            size_start: 1.0,
            size_start_spread: 0.0,
            size_middle: 1.0,
            size_middle_spread: 0.0,
            size_end: 1.0,
            size_end_spread: 0.0,

            opacity_start: 1.0,
            opacity_start_spread: 0.0,
            opacity_middle: 0.5,
            opacity_middle_spread: 0.0,
            opacity_end: 0.0,
            opacity_end_spread: 0.0,

            angle_start: 0.0,
            angle_start_spread: 0.0,
            angle_middle: 0.0,
            angle_middle_spread: 0.0,
            angle_end: 0.0,
            angle_end_spread: 0.0,

            color_start: Vec3::ONE,
            color_start_spread: Vec3::ZERO,
            color_middle: Vec3::ONE,
            color_middle_spread: Vec3::ZERO,
            color_end: Vec3::ONE,
            color_end_spread: Vec3::ZERO,

            duration: None,
            alive: 1.0,
            is_static: false,
        }
    }
}

/// Callback invoked once per respawned particle, after its attributes have
/// been written. Side effects only; the return value is ignored.
pub type SpawnHook = Box<dyn FnMut(&AttributeBufferSet, usize)>;

/// Drives spawning, aging and recycling of the particles in one contiguous
/// slot range of a shared [`AttributeBufferSet`].
///
/// An emitter does nothing until it is added to a
/// [`ParticleGroup`](crate::group::ParticleGroup), which assigns its slot
/// range and derives its emission rate from the group's particle lifetime.
pub struct Emitter {
    emitter_type: EmitterType,
    particle_count: usize,

    position: Vec3,
    position_spread: Vec3,

    radius: f32,
    radius_spread: f32,
    radius_scale: Vec3,
    radius_spread_clamp: f32,

    acceleration: Vec3,
    acceleration_spread: Vec3,
    velocity: Vec3,
    velocity_spread: Vec3,
    speed: f32,
    speed_spread: f32,

    size_start: f32,
    size_start_spread: f32,
    size_middle: f32,
    size_middle_spread: f32,
    size_end: f32,
    size_end_spread: f32,

    opacity_start: f32,
    opacity_start_spread: f32,
    opacity_middle: f32,
    opacity_middle_spread: f32,
    opacity_end: f32,
    opacity_end_spread: f32,

    angle_start: f32,
    angle_start_spread: f32,
    angle_middle: f32,
    angle_middle_spread: f32,
    angle_end: f32,
    angle_end_spread: f32,

    color_start: Vec3,
    color_start_spread: Vec3,
    color_middle: Vec3,
    color_middle_spread: Vec3,
    color_end: Vec3,
    color_end_spread: Vec3,

    duration: Option<f32>,
    alive: f32,
    is_static: bool,

    // Runtime state, owned by the group protocol.
    vertices_index: usize,
    max_age: f32,
    particles_per_second: f32,
    age: f32,
    /// Fractional spawn cursor; stays within `[vertices_index, range end]`.
    particle_index: f32,
    has_rendered: bool,

    /// Curve attributes whose emitter-level parameters changed, mapped to how
    /// many slots have been re-sampled so far. An entry clears once it has
    /// fired for `particle_count` respawns.
    pending_updates: HashMap<CurveAttribute, usize>,
    on_particle_spawn: Option<SpawnHook>,
    rng: SmallRng,
}

impl Emitter {
    /// Build an emitter from a config. A zero `particle_count` is rejected
    /// with a warning and bumped to 1 so the range stays non-empty.
    pub fn new(config: EmitterConfig) -> Self {
        let particle_count = if config.particle_count == 0 {
            log::warn!("invalid particle count 0, using 1");
            1
        } else {
            config.particle_count
        };

        Self {
            emitter_type: config.emitter_type,
            particle_count,

            position: config.position,
            position_spread: config.position_spread,

            radius: config.radius,
            radius_spread: config.radius_spread,
            radius_scale: config.radius_scale,
            radius_spread_clamp: config.radius_spread_clamp,

            acceleration: config.acceleration,
            acceleration_spread: config.acceleration_spread,
            velocity: config.velocity,
            velocity_spread: config.velocity_spread,
            speed: config.speed,
            speed_spread: config.speed_spread,

            size_start: config.size_start,
            size_start_spread: config.size_start_spread,
            size_middle: config.size_middle,
            size_middle_spread: config.size_middle_spread,
            size_end: config.size_end,
            size_end_spread: config.size_end_spread,

            opacity_start: config.opacity_start,
            opacity_start_spread: config.opacity_start_spread,
            opacity_middle: config.opacity_middle,
            opacity_middle_spread: config.opacity_middle_spread,
            opacity_end: config.opacity_end,
            opacity_end_spread: config.opacity_end_spread,

            angle_start: config.angle_start,
            angle_start_spread: config.angle_start_spread,
            angle_middle: config.angle_middle,
            angle_middle_spread: config.angle_middle_spread,
            angle_end: config.angle_end,
            angle_end_spread: config.angle_end_spread,

            color_start: config.color_start,
            color_start_spread: config.color_start_spread,
            color_middle: config.color_middle,
            color_middle_spread: config.color_middle_spread,
            color_end: config.color_end,
            color_end_spread: config.color_end_spread,

            duration: config.duration,
            alive: config.alive,
            is_static: config.is_static,

            vertices_index: 0,
            max_age: 0.0,
            particles_per_second: 0.0,
            age: 0.0,
            particle_index: 0.0,
            has_rendered: false,

            pending_updates: HashMap::new(),
            on_particle_spawn: None,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Reseed the internal generator; tests use this for deterministic runs.
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    /// Install the per-spawn side-effect hook.
    pub fn set_spawn_hook(&mut self, hook: Option<SpawnHook>) {
        self.on_particle_spawn = hook;
    }

    /// Called by the group when this emitter is attached: the slot range is
    /// `[vertices_index, vertices_index + particle_count)` and the emission
    /// rate is one full range of particles per `max_age` seconds.
    pub(crate) fn attach(&mut self, vertices_index: usize, max_age: f32) {
        self.vertices_index = vertices_index;
        self.max_age = max_age;
        self.particles_per_second = self.particle_count as f32 / max_age;
        self.particle_index = vertices_index as f32;
        self.age = 0.0;
        self.has_rendered = false;
    }

    /// Sample initial values for every slot in this emitter's range. Called
    /// by the group at attach time; only static emitters start alive.
    pub(crate) fn initialize_slots(&mut self, buffers: &mut AttributeBufferSet) {
        let initial_alive = if self.is_static { 1.0 } else { 0.0 };
        for i in self.range() {
            buffers.alive.values[i] = initial_alive;
            buffers.age.values[i] = 0.0;
            self.write_spawn_attributes(buffers, i);

            buffers.size.values[i] = Vec3::new(
                random_float(self.size_start, self.size_start_spread, &mut self.rng).abs(),
                random_float(self.size_middle, self.size_middle_spread, &mut self.rng).abs(),
                random_float(self.size_end, self.size_end_spread, &mut self.rng).abs(),
            );
            buffers.opacity.values[i] = Vec3::new(
                random_float(self.opacity_start, self.opacity_start_spread, &mut self.rng).abs(),
                random_float(self.opacity_middle, self.opacity_middle_spread, &mut self.rng).abs(),
                random_float(self.opacity_end, self.opacity_end_spread, &mut self.rng).abs(),
            );
            buffers.angle.values[i] = Vec3::new(
                random_float(self.angle_start, self.angle_start_spread, &mut self.rng).abs(),
                random_float(self.angle_middle, self.angle_middle_spread, &mut self.rng).abs(),
                random_float(self.angle_end, self.angle_end_spread, &mut self.rng).abs(),
            );
            buffers.color_start.values[i] =
                jitter_color(self.color_start, self.color_start_spread, &mut self.rng);
            buffers.color_middle.values[i] =
                jitter_color(self.color_middle, self.color_middle_spread, &mut self.rng);
            buffers.color_end.values[i] =
                jitter_color(self.color_end, self.color_end_spread, &mut self.rng);
        }

        buffers.alive.needs_upload = true;
        buffers.age.needs_upload = true;
        buffers.size.needs_upload = true;
        buffers.opacity.needs_upload = true;
        buffers.angle.needs_upload = true;
        buffers.color_start.needs_upload = true;
        buffers.color_middle.needs_upload = true;
        buffers.color_end.needs_upload = true;
    }

    /// Age, kill and respawn the particles in this emitter's range for one
    /// frame of `dt` seconds.
    pub fn tick(&mut self, buffers: &mut AttributeBufferSet, dt: f32) {
        self.has_rendered = true;

        if self.is_static {
            return;
        }

        let start = self.vertices_index;
        let end = start + self.particle_count;

        // Age live particles and reclaim the expired ones in the same sweep.
        // Aging happens before the expiry check so a particle dies in the
        // exact tick it reaches max age.
        for i in start..end {
            if buffers.alive.values[i] == 1.0 {
                buffers.age.values[i] += dt;
            }
            if buffers.age.values[i] >= self.max_age {
                buffers.age.values[i] = 0.0;
                buffers.alive.values[i] = 0.0;
            }
        }
        buffers.alive.needs_upload = true;
        buffers.age.needs_upload = true;

        // A disabled emitter keeps its in-flight particles aging out but
        // spawns nothing and holds its own age at zero.
        if self.alive == 0.0 {
            self.age = 0.0;
            return;
        }

        // Timed emitters self-terminate. Strictly greater-than: an emitter
        // with duration == 0 still fires on the tick where its age is
        // exactly 0.
        if let Some(duration) = self.duration {
            if self.age > duration {
                self.alive = 0.0;
                self.age = 0.0;
                return;
            }
        }

        // Continuous spawn quantity for this tick. The fractional cursor
        // accumulates sub-particle progress across calls, so rates below one
        // particle per tick still emit smoothly.
        let ppsdt = self.particles_per_second * self.alive * dt;
        let span_end = (self.particle_index + ppsdt).min(end as f32).max(0.0);
        let span_start = self.particle_index as usize;
        let span_stop = span_end.ceil() as usize;

        let mut dead = 0;
        for i in span_start..span_stop {
            if buffers.alive.values[i] != 1.0 {
                dead += 1;
            }
        }

        if dead != 0 {
            // Stagger the newborns' ages evenly across the tick so a burst
            // of simultaneous spawns doesn't visibly step.
            let dt_inc = dt / dead as f32;

            for (offset, i) in (span_start..span_stop).enumerate() {
                if buffers.alive.values[i] != 1.0 {
                    buffers.alive.values[i] = 1.0;
                    buffers.age.values[i] = dt_inc * offset as f32;
                    self.reset_particle(buffers, i);
                }
            }
        }

        self.particle_index += ppsdt;
        if self.particle_index < start as f32 {
            self.particle_index = start as f32;
        }
        if self.particle_index >= end as f32 {
            self.particle_index = start as f32;
        }

        self.age += dt;
        if self.age < 0.0 {
            self.age = 0.0;
        }
    }

    /// Stop emitting. A soft reset leaves in-flight particles to age out
    /// naturally; `force` also kills every slot in the range immediately.
    pub fn reset(&mut self, buffers: &mut AttributeBufferSet, force: bool) {
        self.age = 0.0;
        self.alive = 0.0;

        if force {
            for i in self.range() {
                buffers.alive.values[i] = 0.0;
                buffers.age.values[i] = 0.0;
            }
            buffers.alive.needs_upload = true;
            buffers.age.needs_upload = true;
        }
    }

    pub fn enable(&mut self) {
        self.alive = 1.0;
    }

    pub fn disable(&mut self) {
        self.alive = 0.0;
    }

    /// Give one dead slot a fresh position, velocity and (for cube emitters)
    /// acceleration, apply any pending curve updates to it, then notify the
    /// spawn hook.
    fn reset_particle(&mut self, buffers: &mut AttributeBufferSet, i: usize) {
        self.write_spawn_attributes(buffers, i);
        self.apply_pending_updates(buffers, i);

        if let Some(hook) = self.on_particle_spawn.as_mut() {
            hook(buffers, i);
        }
    }

    fn write_spawn_attributes(&mut self, buffers: &mut AttributeBufferSet, i: usize) {
        let no_jitter = match self.emitter_type {
            EmitterType::Cube => self.position_spread == Vec3::ZERO,
            EmitterType::Sphere | EmitterType::Disk => self.radius == 0.0,
        };

        if no_jitter {
            // Point-emission fast path: the position is copied verbatim, but
            // velocity (and cube acceleration) still get their spread.
            buffers.position.values[i] = self.position;
            buffers.velocity.values[i] =
                jitter_vec3(self.velocity, self.velocity_spread, &mut self.rng);
            buffers.velocity.needs_upload = true;

            if self.emitter_type == EmitterType::Cube {
                buffers.acceleration.values[i] =
                    jitter_vec3(self.acceleration, self.acceleration_spread, &mut self.rng);
                buffers.acceleration.needs_upload = true;
            }
        } else {
            match self.emitter_type {
                EmitterType::Cube => {
                    buffers.position.values[i] =
                        jitter_vec3(self.position, self.position_spread, &mut self.rng);
                    buffers.velocity.values[i] =
                        jitter_vec3(self.velocity, self.velocity_spread, &mut self.rng);
                    buffers.acceleration.values[i] =
                        jitter_vec3(self.acceleration, self.acceleration_spread, &mut self.rng);
                    buffers.velocity.needs_upload = true;
                    buffers.acceleration.needs_upload = true;
                }
                EmitterType::Sphere => {
                    let p = random_on_sphere(
                        self.position,
                        self.radius,
                        self.radius_spread,
                        self.radius_scale,
                        self.radius_spread_clamp,
                        &mut self.rng,
                    );
                    buffers.position.values[i] = p;
                    buffers.velocity.values[i] = radial_velocity(
                        self.position,
                        p,
                        self.speed,
                        self.speed_spread,
                        &mut self.rng,
                    );
                    buffers.velocity.needs_upload = true;
                }
                EmitterType::Disk => {
                    let p = random_on_disk(
                        self.position,
                        self.radius,
                        self.radius_spread,
                        self.radius_scale,
                        self.radius_spread_clamp,
                        &mut self.rng,
                    );
                    buffers.position.values[i] = p;
                    buffers.velocity.values[i] = radial_velocity(
                        self.position,
                        p,
                        self.speed,
                        self.speed_spread,
                        &mut self.rng,
                    );
                    buffers.velocity.needs_upload = true;
                }
            }
        }

        buffers.position.needs_upload = true;
    }

    /// Re-sample each flagged curve attribute into slot `i`. A flag clears
    /// after `particle_count` applications, at which point every slot has
    /// cycled through a respawn under the new parameter value.
    ///
    /// Skipped until the first tick: initial spawn already samples the
    /// current parameters.
    fn apply_pending_updates(&mut self, buffers: &mut AttributeBufferSet, i: usize) {
        if !self.has_rendered || self.pending_updates.is_empty() {
            return;
        }

        let mut pending = std::mem::take(&mut self.pending_updates);
        pending.retain(|&attribute, applied| {
            self.apply_curve_update(buffers, i, attribute);
            *applied += 1;
            *applied < self.particle_count
        });
        self.pending_updates = pending;
    }

    fn apply_curve_update(
        &mut self,
        buffers: &mut AttributeBufferSet,
        i: usize,
        attribute: CurveAttribute,
    ) {
        let rng = &mut self.rng;
        match attribute {
            CurveAttribute::SizeStart => {
                buffers.size.values[i].x =
                    random_float(self.size_start, self.size_start_spread, rng).abs();
                buffers.size.needs_upload = true;
            }
            CurveAttribute::SizeMiddle => {
                buffers.size.values[i].y =
                    random_float(self.size_middle, self.size_middle_spread, rng).abs();
                buffers.size.needs_upload = true;
            }
            CurveAttribute::SizeEnd => {
                buffers.size.values[i].z =
                    random_float(self.size_end, self.size_end_spread, rng).abs();
                buffers.size.needs_upload = true;
            }
            CurveAttribute::ColorStart => {
                buffers.color_start.values[i] =
                    jitter_color(self.color_start, self.color_start_spread, rng);
                buffers.color_start.needs_upload = true;
            }
            CurveAttribute::ColorMiddle => {
                buffers.color_middle.values[i] =
                    jitter_color(self.color_middle, self.color_middle_spread, rng);
                buffers.color_middle.needs_upload = true;
            }
            CurveAttribute::ColorEnd => {
                buffers.color_end.values[i] =
                    jitter_color(self.color_end, self.color_end_spread, rng);
                buffers.color_end.needs_upload = true;
            }
            CurveAttribute::OpacityStart => {
                buffers.opacity.values[i].x =
                    random_float(self.opacity_start, self.opacity_start_spread, rng).abs();
                buffers.opacity.needs_upload = true;
            }
            CurveAttribute::OpacityMiddle => {
                buffers.opacity.values[i].y =
                    random_float(self.opacity_middle, self.opacity_middle_spread, rng).abs();
                buffers.opacity.needs_upload = true;
            }
            CurveAttribute::OpacityEnd => {
                buffers.opacity.values[i].z =
                    random_float(self.opacity_end, self.opacity_end_spread, rng).abs();
                buffers.opacity.needs_upload = true;
            }
            CurveAttribute::AngleStart => {
                buffers.angle.values[i].x =
                    random_float(self.angle_start, self.angle_start_spread, rng).abs();
                buffers.angle.needs_upload = true;
            }
            CurveAttribute::AngleMiddle => {
                buffers.angle.values[i].y =
                    random_float(self.angle_middle, self.angle_middle_spread, rng).abs();
                buffers.angle.needs_upload = true;
            }
            CurveAttribute::AngleEnd => {
                buffers.angle.values[i].z =
                    random_float(self.angle_end, self.angle_end_spread, rng).abs();
                buffers.angle.needs_upload = true;
            }
        }
    }

    fn flag(&mut self, attribute: CurveAttribute) {
        self.pending_updates.insert(attribute, 0);
    }

    fn range(&self) -> std::ops::Range<usize> {
        self.vertices_index..self.vertices_index + self.particle_count
    }

    // --- parameter setters ---------------------------------------------

    pub fn set_type(&mut self, emitter_type: EmitterType) {
        self.emitter_type = emitter_type;
    }

    /// Only takes effect before the emitter is attached to a group; the slot
    /// range is fixed at attach time.
    pub fn set_particle_count(&mut self, count: usize) -> Result<(), EmitterError> {
        if count == 0 {
            log::warn!(
                "invalid particle count 0, keeping {}",
                self.particle_count
            );
            return Err(EmitterError::InvalidParticleCount(count));
        }
        self.particle_count = count;
        Ok(())
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_position_spread(&mut self, spread: Vec3) {
        self.position_spread = spread;
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    pub fn set_radius_spread(&mut self, spread: f32) {
        self.radius_spread = spread;
    }

    pub fn set_radius_scale(&mut self, scale: Vec3) {
        self.radius_scale = scale;
    }

    pub fn set_radius_spread_clamp(&mut self, clamp: f32) {
        self.radius_spread_clamp = clamp;
    }

    pub fn set_acceleration(&mut self, acceleration: Vec3) {
        self.acceleration = acceleration;
    }

    pub fn set_acceleration_spread(&mut self, spread: Vec3) {
        self.acceleration_spread = spread;
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    pub fn set_velocity_spread(&mut self, spread: Vec3) {
        self.velocity_spread = spread;
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn set_speed_spread(&mut self, spread: f32) {
        self.speed_spread = spread;
    }

    pub fn set_size_start(&mut self, value: f32) {
        self.size_start = value;
        self.flag(CurveAttribute::SizeStart);
    }

    pub fn set_size_start_spread(&mut self, spread: f32) {
        self.size_start_spread = spread;
        self.flag(CurveAttribute::SizeStart);
    }

    pub fn set_size_middle(&mut self, value: f32) {
        self.size_middle = value;
        self.flag(CurveAttribute::SizeMiddle);
    }

    /// Recompute the middle size as the mean of start and end.
    pub fn set_size_middle_auto(&mut self) {
        self.size_middle = (self.size_start + self.size_end) * 0.5;
        self.flag(CurveAttribute::SizeMiddle);
    }

    pub fn set_size_middle_spread(&mut self, spread: f32) {
        self.size_middle_spread = spread;
        self.flag(CurveAttribute::SizeMiddle);
    }

    pub fn set_size_end(&mut self, value: f32) {
        self.size_end = value;
        self.flag(CurveAttribute::SizeEnd);
    }

    pub fn set_size_end_spread(&mut self, spread: f32) {
        self.size_end_spread = spread;
        self.flag(CurveAttribute::SizeEnd);
    }

    pub fn set_opacity_start(&mut self, value: f32) {
        self.opacity_start = value;
        self.flag(CurveAttribute::OpacityStart);
    }

    pub fn set_opacity_start_spread(&mut self, spread: f32) {
        self.opacity_start_spread = spread;
        self.flag(CurveAttribute::OpacityStart);
    }

    pub fn set_opacity_middle(&mut self, value: f32) {
        self.opacity_middle = value;
        self.flag(CurveAttribute::OpacityMiddle);
    }

    /// Recompute the middle opacity as the mean of start and end.
    pub fn set_opacity_middle_auto(&mut self) {
        self.opacity_middle = (self.opacity_start + self.opacity_end) * 0.5;
        self.flag(CurveAttribute::OpacityMiddle);
    }

    pub fn set_opacity_middle_spread(&mut self, spread: f32) {
        self.opacity_middle_spread = spread;
        self.flag(CurveAttribute::OpacityMiddle);
    }

    pub fn set_opacity_end(&mut self, value: f32) {
        self.opacity_end = value;
        self.flag(CurveAttribute::OpacityEnd);
    }

    pub fn set_opacity_end_spread(&mut self, spread: f32) {
        self.opacity_end_spread = spread;
        self.flag(CurveAttribute::OpacityEnd);
    }

    pub fn set_angle_start(&mut self, value: f32) {
        self.angle_start = value;
        self.flag(CurveAttribute::AngleStart);
    }

    pub fn set_angle_start_spread(&mut self, spread: f32) {
        self.angle_start_spread = spread;
        self.flag(CurveAttribute::AngleStart);
    }

    pub fn set_angle_middle(&mut self, value: f32) {
        self.angle_middle = value;
        self.flag(CurveAttribute::AngleMiddle);
    }

    /// Recompute the middle angle as the mean of start and end.
    pub fn set_angle_middle_auto(&mut self) {
        self.angle_middle = (self.angle_start + self.angle_end) * 0.5;
        self.flag(CurveAttribute::AngleMiddle);
    }

    pub fn set_angle_middle_spread(&mut self, spread: f32) {
        self.angle_middle_spread = spread;
        self.flag(CurveAttribute::AngleMiddle);
    }

    pub fn set_angle_end(&mut self, value: f32) {
        self.angle_end = value;
        self.flag(CurveAttribute::AngleEnd);
    }

    pub fn set_angle_end_spread(&mut self, spread: f32) {
        self.angle_end_spread = spread;
        self.flag(CurveAttribute::AngleEnd);
    }

    pub fn set_color_start(&mut self, color: Vec3) {
        self.color_start = color;
        self.flag(CurveAttribute::ColorStart);
    }

    pub fn set_color_start_spread(&mut self, spread: Vec3) {
        self.color_start_spread = spread;
        self.flag(CurveAttribute::ColorStart);
    }

    pub fn set_color_middle(&mut self, color: Vec3) {
        self.color_middle = color;
        self.flag(CurveAttribute::ColorMiddle);
    }

    /// Recompute the middle color as the additive blend of start and end at
    /// half weight.
    pub fn set_color_middle_auto(&mut self) {
        self.color_middle = (self.color_start + self.color_end) * 0.5;
        self.flag(CurveAttribute::ColorMiddle);
    }

    pub fn set_color_middle_spread(&mut self, spread: Vec3) {
        self.color_middle_spread = spread;
        self.flag(CurveAttribute::ColorMiddle);
    }

    pub fn set_color_end(&mut self, color: Vec3) {
        self.color_end = color;
        self.flag(CurveAttribute::ColorEnd);
    }

    pub fn set_color_end_spread(&mut self, spread: Vec3) {
        self.color_end_spread = spread;
        self.flag(CurveAttribute::ColorEnd);
    }

    pub fn set_duration(&mut self, duration: Option<f32>) {
        self.duration = duration;
    }

    /// Set the emitter-level alive scalar directly. Values between 0 and 1
    /// throttle the spawn rate proportionally.
    pub fn set_alive(&mut self, alive: f32) {
        self.alive = alive;
    }

    pub fn set_static(&mut self, is_static: bool) {
        self.is_static = is_static;
    }

    // --- parameter getters ---------------------------------------------

    pub fn emitter_type(&self) -> EmitterType {
        self.emitter_type
    }

    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn position_spread(&self) -> Vec3 {
        self.position_spread
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn radius_spread(&self) -> f32 {
        self.radius_spread
    }

    pub fn radius_scale(&self) -> Vec3 {
        self.radius_scale
    }

    pub fn radius_spread_clamp(&self) -> f32 {
        self.radius_spread_clamp
    }

    pub fn acceleration(&self) -> Vec3 {
        self.acceleration
    }

    pub fn acceleration_spread(&self) -> Vec3 {
        self.acceleration_spread
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn velocity_spread(&self) -> Vec3 {
        self.velocity_spread
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn speed_spread(&self) -> f32 {
        self.speed_spread
    }

    pub fn size_start(&self) -> f32 {
        self.size_start
    }

    pub fn size_middle(&self) -> f32 {
        self.size_middle
    }

    pub fn size_end(&self) -> f32 {
        self.size_end
    }

    pub fn opacity_start(&self) -> f32 {
        self.opacity_start
    }

    pub fn opacity_middle(&self) -> f32 {
        self.opacity_middle
    }

    pub fn opacity_end(&self) -> f32 {
        self.opacity_end
    }

    pub fn angle_start(&self) -> f32 {
        self.angle_start
    }

    pub fn angle_middle(&self) -> f32 {
        self.angle_middle
    }

    pub fn angle_end(&self) -> f32 {
        self.angle_end
    }

    pub fn color_start(&self) -> Vec3 {
        self.color_start
    }

    pub fn color_middle(&self) -> Vec3 {
        self.color_middle
    }

    pub fn color_end(&self) -> Vec3 {
        self.color_end
    }

    pub fn duration(&self) -> Option<f32> {
        self.duration
    }

    pub fn alive(&self) -> f32 {
        self.alive
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Cumulative emission age in seconds.
    pub fn age(&self) -> f32 {
        self.age
    }

    /// First slot index of this emitter's range.
    pub fn vertices_index(&self) -> usize {
        self.vertices_index
    }

    pub fn max_age(&self) -> f32 {
        self.max_age
    }

    pub fn particles_per_second(&self) -> f32 {
        self.particles_per_second
    }

    /// Current fractional spawn cursor.
    pub fn particle_index(&self) -> f32 {
        self.particle_index
    }

    /// True while any curve attribute still has respawns left to re-sample.
    pub fn has_pending_updates(&self) -> bool {
        !self.pending_updates.is_empty()
    }
}
