//! The dirty-buffer handshake between the simulation and the external
//! upload step.

use shader_particles::{Emitter, EmitterConfig, ParticleAttribute, ParticleGroup};

fn cube_emitter(particle_count: usize) -> Emitter {
    let _ = env_logger::builder().is_test(true).try_init();
    Emitter::new(EmitterConfig {
        particle_count,
        ..Default::default()
    })
}

fn acknowledge_all(group: &mut ParticleGroup) {
    for attribute in ParticleAttribute::ALL {
        group.clear_dirty(attribute);
    }
}

#[test]
fn fresh_group_requires_a_full_first_upload() {
    let group = ParticleGroup::new(32, 2.0);
    assert_eq!(
        group.dirty_attributes().len(),
        ParticleAttribute::ALL.len()
    );
}

#[test]
fn tick_marks_only_the_buffers_it_wrote() {
    let mut group = ParticleGroup::new(32, 2.0);
    group.add_emitter(cube_emitter(32)).unwrap();
    acknowledge_all(&mut group);

    group.tick(0.016);

    let dirty = group.dirty_attributes();
    assert!(dirty.contains(&ParticleAttribute::Alive));
    assert!(dirty.contains(&ParticleAttribute::Age));
    assert!(dirty.contains(&ParticleAttribute::Position));
    assert!(dirty.contains(&ParticleAttribute::Velocity));
    // Cube emitters re-sample acceleration on every spawn.
    assert!(dirty.contains(&ParticleAttribute::Acceleration));

    // No curve parameter changed, so the curve buffers were not touched.
    assert!(!dirty.contains(&ParticleAttribute::Size));
    assert!(!dirty.contains(&ParticleAttribute::ColorStart));
    assert!(!dirty.contains(&ParticleAttribute::Opacity));
    assert!(!dirty.contains(&ParticleAttribute::Angle));
}

#[test]
fn pending_curve_updates_dirty_their_buffer_on_respawn() {
    let mut group = ParticleGroup::new(4, 0.1);
    let id = group.add_emitter(cube_emitter(4)).unwrap();
    group.tick(0.1);
    acknowledge_all(&mut group);

    group.emitter_mut(id).unwrap().set_opacity_end(0.25);
    // The setter alone writes nothing; only respawns do.
    assert!(!group
        .dirty_attributes()
        .contains(&ParticleAttribute::Opacity));

    group.tick(0.1);
    assert!(group
        .dirty_attributes()
        .contains(&ParticleAttribute::Opacity));
}

#[test]
fn clear_dirty_is_sticky_until_the_next_write() {
    let mut group = ParticleGroup::new(16, 5.0);
    group.add_emitter(cube_emitter(16)).unwrap();

    group.tick(0.016);
    acknowledge_all(&mut group);
    assert!(group.dirty_attributes().is_empty());

    // The next tick writes ages again.
    group.tick(0.016);
    assert!(group.dirty_attributes().contains(&ParticleAttribute::Age));
}

#[test]
fn attribute_bytes_match_slot_counts() {
    let mut group = ParticleGroup::new(8, 2.0);
    group.add_emitter(cube_emitter(8)).unwrap();

    // f32 per slot for the flags, Vec3 per slot for everything else.
    assert_eq!(group.attribute_bytes(ParticleAttribute::Alive).len(), 8 * 4);
    assert_eq!(
        group.attribute_bytes(ParticleAttribute::Velocity).len(),
        8 * 12
    );
}
