//! Stateless sampling helpers used by the respawn path.
//!
//! Every function takes the caller's RNG explicitly so emitters stay
//! deterministic under a seeded generator.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Sample a value uniformly from `base ± spread / 2`.
///
/// A negative spread flips the interval but covers the same values.
pub fn random_float(base: f32, spread: f32, rng: &mut impl Rng) -> f32 {
    base + spread * (rng.gen::<f32>() - 0.5)
}

/// Jitter each component of `base` by the matching component of `spread`.
pub fn jitter_vec3(base: Vec3, spread: Vec3, rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        random_float(base.x, spread.x, rng),
        random_float(base.y, spread.y, rng),
        random_float(base.z, spread.z, rng),
    )
}

/// Jitter an RGB color stored as a `Vec3`, clamping each channel to `[0, 1]`.
pub fn jitter_color(base: Vec3, spread: Vec3, rng: &mut impl Rng) -> Vec3 {
    jitter_vec3(base, spread, rng).clamp(Vec3::ZERO, Vec3::ONE)
}

/// Pick a point on a sphere shell around `center`.
///
/// The shell radius is `radius ± radius_spread / 2`; when `spread_clamp` is
/// non-zero the sampled radius is quantised to its nearest multiple, which
/// turns the spread into a set of discrete shells. `scale` stretches the
/// shell per axis after placement.
pub fn random_on_sphere(
    center: Vec3,
    radius: f32,
    radius_spread: f32,
    scale: Vec3,
    spread_clamp: f32,
    rng: &mut impl Rng,
) -> Vec3 {
    let z = 2.0 * rng.gen::<f32>() - 1.0;
    let t = TAU * rng.gen::<f32>();
    let ring = (1.0 - z * z).sqrt();

    let mut r = random_float(radius, radius_spread, rng);
    if spread_clamp != 0.0 {
        r = (r / spread_clamp).round() * spread_clamp;
    }

    center + Vec3::new(ring * t.cos(), ring * t.sin(), z) * r * scale
}

/// Pick a point on a disk in the XY plane around `center`.
///
/// Same radius-spread and clamp semantics as [`random_on_sphere`], except the
/// sampled radius is taken as an absolute value.
pub fn random_on_disk(
    center: Vec3,
    radius: f32,
    radius_spread: f32,
    scale: Vec3,
    spread_clamp: f32,
    rng: &mut impl Rng,
) -> Vec3 {
    let t = TAU * rng.gen::<f32>();

    let mut r = random_float(radius, radius_spread, rng).abs();
    if spread_clamp != 0.0 {
        r = (r / spread_clamp).round() * spread_clamp;
    }

    center + Vec3::new(t.cos(), t.sin(), 0.0) * r * scale
}

/// Outward velocity for a particle placed at `position` by a sphere or disk
/// emitter centered at `origin`: direction away from the origin, magnitude
/// `|speed ± speed_spread / 2|`.
///
/// A particle sitting exactly on the origin gets zero velocity rather than a
/// NaN direction.
pub fn radial_velocity(
    origin: Vec3,
    position: Vec3,
    speed: f32,
    speed_spread: f32,
    rng: &mut impl Rng,
) -> Vec3 {
    (position - origin).normalize_or_zero() * random_float(speed, speed_spread, rng).abs()
}
