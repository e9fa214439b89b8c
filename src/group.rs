use crate::buffers::{AttributeBufferSet, ParticleAttribute};
use crate::emitter::Emitter;

/// Default particle lifetime in seconds when a group is given a non-positive
/// one.
const DEFAULT_MAX_AGE: f32 = 3.0;

/// Handle to an emitter inside a [`ParticleGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmitterId(u64);

#[derive(Debug, thiserror::Error)]
pub enum GroupError {
    #[error("emitter needs {requested} slots but only {available} remain")]
    OutOfCapacity { requested: usize, available: usize },
}

/// Owns the shared attribute buffers and the emitters writing into them.
///
/// The group hands each emitter a contiguous, disjoint slot range at attach
/// time; that range partitioning is the only synchronization the buffer set
/// needs. Ticking runs emitters sequentially in insertion order.
///
/// The external upload step consumes [`dirty_attributes`] /
/// [`attribute_bytes`] and acknowledges with [`clear_dirty`].
///
/// [`dirty_attributes`]: ParticleGroup::dirty_attributes
/// [`attribute_bytes`]: ParticleGroup::attribute_bytes
/// [`clear_dirty`]: ParticleGroup::clear_dirty
pub struct ParticleGroup {
    buffers: AttributeBufferSet,
    emitters: Vec<(EmitterId, Emitter)>,
    max_age: f32,
    next_slot: usize,
    next_id: u64,
}

impl ParticleGroup {
    /// Create a group with room for `capacity` particles, each living for
    /// `max_age` seconds after spawn.
    pub fn new(capacity: usize, max_age: f32) -> Self {
        let max_age = if max_age > 0.0 {
            max_age
        } else {
            log::warn!(
                "invalid max age {}, using {}",
                max_age,
                DEFAULT_MAX_AGE
            );
            DEFAULT_MAX_AGE
        };

        Self {
            buffers: AttributeBufferSet::new(capacity),
            emitters: Vec::new(),
            max_age,
            next_slot: 0,
            next_id: 0,
        }
    }

    /// Attach an emitter, allocating the next free slot range for it and
    /// sampling its initial particle attributes into the shared buffers.
    ///
    /// Ranges are handed out in attach order and never reused; a removed
    /// emitter's slots stay retired.
    pub fn add_emitter(&mut self, mut emitter: Emitter) -> Result<EmitterId, GroupError> {
        let requested = emitter.particle_count();
        let available = self.buffers.len() - self.next_slot;
        if requested > available {
            log::warn!(
                "cannot attach emitter: needs {} slots, {} remain",
                requested,
                available
            );
            return Err(GroupError::OutOfCapacity {
                requested,
                available,
            });
        }

        let vertices_index = self.next_slot;
        self.next_slot += requested;

        emitter.attach(vertices_index, self.max_age);
        emitter.initialize_slots(&mut self.buffers);

        let id = EmitterId(self.next_id);
        self.next_id += 1;
        log::debug!(
            "emitter {:?} owns slots {}..{}",
            id,
            vertices_index,
            vertices_index + requested
        );

        self.emitters.push((id, emitter));
        Ok(id)
    }

    /// Detach an emitter. Its slots keep whatever state they had; call
    /// [`Emitter::reset`] with `force` first to clear them.
    pub fn remove_emitter(&mut self, id: EmitterId) -> Option<Emitter> {
        let index = self.emitters.iter().position(|(eid, _)| *eid == id)?;
        Some(self.emitters.remove(index).1)
    }

    pub fn emitter(&self, id: EmitterId) -> Option<&Emitter> {
        self.emitters
            .iter()
            .find(|(eid, _)| *eid == id)
            .map(|(_, e)| e)
    }

    pub fn emitter_mut(&mut self, id: EmitterId) -> Option<&mut Emitter> {
        self.emitters
            .iter_mut()
            .find(|(eid, _)| *eid == id)
            .map(|(_, e)| e)
    }

    /// Advance every emitter by `dt` seconds, in insertion order.
    pub fn tick(&mut self, dt: f32) {
        for (_, emitter) in &mut self.emitters {
            emitter.tick(&mut self.buffers, dt);
        }
    }

    /// Soft- or hard-reset one emitter (see [`Emitter::reset`]).
    pub fn reset_emitter(&mut self, id: EmitterId, force: bool) {
        if let Some(index) = self.emitters.iter().position(|(eid, _)| *eid == id) {
            let (_, emitter) = &mut self.emitters[index];
            emitter.reset(&mut self.buffers, force);
        }
    }

    pub fn buffers(&self) -> &AttributeBufferSet {
        &self.buffers
    }

    pub fn buffers_mut(&mut self) -> &mut AttributeBufferSet {
        &mut self.buffers
    }

    /// Buffers touched since the last upload.
    pub fn dirty_attributes(&self) -> Vec<ParticleAttribute> {
        self.buffers.dirty_attributes()
    }

    /// Raw bytes of one attribute array, for the upload step.
    pub fn attribute_bytes(&self, attribute: ParticleAttribute) -> &[u8] {
        self.buffers.attribute_bytes(attribute)
    }

    /// Acknowledge an uploaded buffer.
    pub fn clear_dirty(&mut self, attribute: ParticleAttribute) {
        self.buffers.clear_dirty(attribute);
    }

    /// Total slot capacity of the shared buffers.
    pub fn capacity(&self) -> usize {
        self.buffers.len()
    }

    /// Slots allocated to emitters so far (including retired ranges).
    pub fn slots_used(&self) -> usize {
        self.next_slot
    }

    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }

    pub fn max_age(&self) -> f32 {
        self.max_age
    }
}
