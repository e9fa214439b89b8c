//! End-to-end coverage of the emitter tick/spawn/recycle protocol through a
//! group-owned buffer set.

use glam::Vec3;
use shader_particles::{Emitter, EmitterConfig, ParticleGroup};
use std::cell::Cell;
use std::rc::Rc;

fn cube_emitter(particle_count: usize) -> Emitter {
    let _ = env_logger::builder().is_test(true).try_init();
    Emitter::new(EmitterConfig {
        particle_count,
        ..Default::default()
    })
}

/// Counts dead-to-alive transitions via the spawn hook.
fn with_spawn_counter(mut emitter: Emitter) -> (Emitter, Rc<Cell<usize>>) {
    let counter = Rc::new(Cell::new(0));
    let hook_counter = Rc::clone(&counter);
    emitter.set_spawn_hook(Some(Box::new(move |_, _| {
        hook_counter.set(hook_counter.get() + 1);
    })));
    (emitter, counter)
}

#[test]
fn ages_and_alive_flags_stay_bounded() {
    let max_age = 0.5;
    let mut group = ParticleGroup::new(100, max_age);
    group.add_emitter(cube_emitter(100)).unwrap();

    for _ in 0..50 {
        group.tick(0.016);

        let buffers = group.buffers();
        for i in 0..buffers.len() {
            let age = buffers.age.values[i];
            let alive = buffers.alive.values[i];
            assert!((0.0..=max_age).contains(&age), "age {} out of bounds", age);
            assert!(alive == 0.0 || alive == 1.0, "alive {} not a flag", alive);
        }
    }
}

#[test]
fn spawn_rate_is_conserved_over_time() {
    // 200 particles over a 2 second lifetime: 100 particles per second.
    let mut group = ParticleGroup::new(200, 2.0);
    let (emitter, spawned) = with_spawn_counter(cube_emitter(200));
    group.add_emitter(emitter).unwrap();

    // One simulated second; nothing lives long enough to die and recycle.
    for _ in 0..100 {
        group.tick(0.01);
    }

    let count = spawned.get();
    assert!(
        (99..=101).contains(&count),
        "expected ~100 spawns, got {}",
        count
    );
}

#[test]
fn fractional_alive_throttles_the_spawn_rate() {
    let mut group = ParticleGroup::new(200, 2.0);
    let (mut emitter, spawned) = with_spawn_counter(cube_emitter(200));
    emitter.set_alive(0.5);
    group.add_emitter(emitter).unwrap();

    for _ in 0..100 {
        group.tick(0.01);
    }

    let count = spawned.get();
    assert!(
        (49..=51).contains(&count),
        "expected ~50 spawns at half throttle, got {}",
        count
    );
}

#[test]
fn sub_particle_rates_accumulate_across_ticks() {
    // 10 particles over 10 seconds: one per second, far below one per tick.
    let mut group = ParticleGroup::new(10, 10.0);
    let (emitter, spawned) = with_spawn_counter(cube_emitter(10));
    group.add_emitter(emitter).unwrap();

    for _ in 0..25 {
        group.tick(0.1);
    }

    // 2.5 seconds of progress: the cursor crossed slots 0, 1 and 2.
    assert_eq!(spawned.get(), 3);
}

#[test]
fn soft_reset_keeps_slots_hard_reset_clears_them() {
    let mut group = ParticleGroup::new(50, 10.0);
    let id = group.add_emitter(cube_emitter(50)).unwrap();

    for _ in 0..20 {
        group.tick(0.05);
    }
    let alive_before: Vec<f32> = group.buffers().alive.values.clone();
    let age_before: Vec<f32> = group.buffers().age.values.clone();
    assert!(alive_before.iter().any(|&a| a == 1.0));

    // Soft reset: the emitter stops but in-flight particles are untouched.
    group.reset_emitter(id, false);
    assert_eq!(group.emitter(id).unwrap().alive(), 0.0);
    assert_eq!(group.emitter(id).unwrap().age(), 0.0);
    assert_eq!(group.buffers().alive.values, alive_before);
    assert_eq!(group.buffers().age.values, age_before);

    // Hard reset kills every slot in the range immediately.
    group.emitter_mut(id).unwrap().enable();
    group.tick(0.05);
    group.reset_emitter(id, true);
    assert!(group.buffers().alive.values.iter().all(|&a| a == 0.0));
    assert!(group.buffers().age.values.iter().all(|&a| a == 0.0));

    // Re-enabling resumes spawning.
    group.emitter_mut(id).unwrap().enable();
    group.tick(0.05);
    assert!(group.buffers().alive.values.iter().any(|&a| a == 1.0));
}

#[test]
fn zero_duration_emitter_fires_exactly_one_tick() {
    let mut group = ParticleGroup::new(10, 10.0);
    let mut emitter = cube_emitter(10);
    emitter.set_duration(Some(0.0));
    let id = group.add_emitter(emitter).unwrap();

    // First tick: cumulative age is exactly 0, which is not strictly greater
    // than the duration, so the emitter still spawns.
    group.tick(0.016);
    assert_eq!(group.emitter(id).unwrap().alive(), 1.0);
    assert_eq!(group.buffers().alive.values[0], 1.0);

    // Second tick: age (0.016) now exceeds 0 and the emitter self-terminates
    // before spawning anything else.
    group.tick(0.016);
    assert_eq!(group.emitter(id).unwrap().alive(), 0.0);
    assert_eq!(group.emitter(id).unwrap().age(), 0.0);
}

#[test]
fn disabled_emitter_spawns_nothing_and_holds_age_at_zero() {
    let mut group = ParticleGroup::new(20, 5.0);
    let (mut emitter, spawned) = with_spawn_counter(cube_emitter(20));
    emitter.disable();
    let id = group.add_emitter(emitter).unwrap();

    for _ in 0..10 {
        group.tick(0.1);
    }
    assert_eq!(spawned.get(), 0);
    assert_eq!(group.emitter(id).unwrap().age(), 0.0);
    assert!(group.buffers().alive.values.iter().all(|&a| a == 0.0));
}

#[test]
fn curve_change_converges_after_one_full_respawn_cycle() {
    // Four slots with a 0.1s lifetime and 0.1s ticks: the whole range dies
    // and respawns every tick.
    let mut group = ParticleGroup::new(4, 0.1);
    let id = group.add_emitter(cube_emitter(4)).unwrap();

    group.tick(0.1);
    let before: Vec<f32> = group.buffers().size.values.iter().map(|s| s.x).collect();
    assert!(before.iter().all(|&x| x == 1.0));

    group.emitter_mut(id).unwrap().set_size_start(5.0);
    assert!(group.emitter(id).unwrap().has_pending_updates());

    // One full cycle of respawns re-samples every slot exactly once.
    group.tick(0.1);
    assert!(group
        .buffers()
        .size
        .values
        .iter()
        .all(|s| s.x == 5.0));
    assert!(!group.emitter(id).unwrap().has_pending_updates());
}

#[test]
fn curve_values_survive_until_the_parameter_changes() {
    // Middle and end lanes keep their original sampling while only the start
    // lane was flagged.
    let mut group = ParticleGroup::new(4, 0.1);
    let id = group.add_emitter(cube_emitter(4)).unwrap();

    group.tick(0.1);
    group.emitter_mut(id).unwrap().set_size_start(5.0);
    group.tick(0.1);

    for s in &group.buffers().size.values {
        assert_eq!(s.x, 5.0);
        assert_eq!(s.y, 1.0);
        assert_eq!(s.z, 1.0);
    }
}

#[test]
fn emitters_never_write_outside_their_own_range() {
    let mut group = ParticleGroup::new(140, 2.0);

    let mut first = cube_emitter(50);
    first.set_position(Vec3::new(1.0, 0.0, 0.0));
    let mut second = cube_emitter(70);
    second.set_position(Vec3::new(2.0, 0.0, 0.0));

    group.add_emitter(first).unwrap();
    group.add_emitter(second).unwrap();

    for _ in 0..10 {
        group.tick(0.1);
    }

    let buffers = group.buffers();
    for i in 0..50 {
        if buffers.alive.values[i] == 1.0 {
            assert_eq!(buffers.position.values[i].x, 1.0);
        }
    }
    for i in 50..120 {
        if buffers.alive.values[i] == 1.0 {
            assert_eq!(buffers.position.values[i].x, 2.0);
        }
    }
    // Unallocated slots are never touched.
    for i in 120..140 {
        assert_eq!(buffers.alive.values[i], 0.0);
        assert_eq!(buffers.age.values[i], 0.0);
        assert_eq!(buffers.position.values[i], Vec3::ZERO);
    }
}
