use glam::Vec3;

/// Identifies one per-particle attribute array in the shared buffer set.
///
/// Every attribute array has the same length and the same slot-to-particle
/// mapping; a slot index means the same particle in all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleAttribute {
    Alive,
    Age,
    Position,
    Velocity,
    Acceleration,
    Size,
    ColorStart,
    ColorMiddle,
    ColorEnd,
    Opacity,
    Angle,
}

impl ParticleAttribute {
    pub const ALL: [ParticleAttribute; 11] = [
        ParticleAttribute::Alive,
        ParticleAttribute::Age,
        ParticleAttribute::Position,
        ParticleAttribute::Velocity,
        ParticleAttribute::Acceleration,
        ParticleAttribute::Size,
        ParticleAttribute::ColorStart,
        ParticleAttribute::ColorMiddle,
        ParticleAttribute::ColorEnd,
        ParticleAttribute::Opacity,
        ParticleAttribute::Angle,
    ];
}

/// One fixed-length attribute array plus its upload flag.
///
/// `needs_upload` is set by whoever mutates `values` and cleared only by the
/// external upload step, so partial re-uploads stay cheap: untouched buffers
/// are skipped entirely.
pub struct AttributeBuffer<T> {
    pub values: Vec<T>,
    pub needs_upload: bool,
}

impl<T: Copy + Default> AttributeBuffer<T> {
    fn filled(len: usize) -> Self {
        Self {
            // A fresh buffer has never been seen by the GPU.
            values: vec![T::default(); len],
            needs_upload: true,
        }
    }
}

impl<T: bytemuck::Pod> AttributeBuffer<T> {
    /// Raw byte view for the upload step.
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.values)
    }
}

/// The set of parallel per-particle attribute arrays shared by all emitters
/// in a group.
///
/// Structure-of-arrays layout: the slot index is the particle. A slot holds a
/// live particle exactly when `alive` is `1.0` and its `age` is below the
/// group's maximum age. The size, opacity and angle buffers pack the
/// start/middle/end curve values into the x/y/z lanes of one vector per slot,
/// matching the GPU attribute convention.
///
/// No index validation happens here; emitters guarantee they only write
/// inside their own slot range.
pub struct AttributeBufferSet {
    len: usize,
    pub alive: AttributeBuffer<f32>,
    pub age: AttributeBuffer<f32>,
    pub position: AttributeBuffer<Vec3>,
    pub velocity: AttributeBuffer<Vec3>,
    pub acceleration: AttributeBuffer<Vec3>,
    pub size: AttributeBuffer<Vec3>,
    pub color_start: AttributeBuffer<Vec3>,
    pub color_middle: AttributeBuffer<Vec3>,
    pub color_end: AttributeBuffer<Vec3>,
    pub opacity: AttributeBuffer<Vec3>,
    pub angle: AttributeBuffer<Vec3>,
}

impl AttributeBufferSet {
    /// Create a buffer set with `capacity` slots, all dead.
    pub fn new(capacity: usize) -> Self {
        Self {
            len: capacity,
            alive: AttributeBuffer::filled(capacity),
            age: AttributeBuffer::filled(capacity),
            position: AttributeBuffer::filled(capacity),
            velocity: AttributeBuffer::filled(capacity),
            acceleration: AttributeBuffer::filled(capacity),
            size: AttributeBuffer::filled(capacity),
            color_start: AttributeBuffer::filled(capacity),
            color_middle: AttributeBuffer::filled(capacity),
            color_end: AttributeBuffer::filled(capacity),
            opacity: AttributeBuffer::filled(capacity),
            angle: AttributeBuffer::filled(capacity),
        }
    }

    /// Number of slots in every attribute array.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn mark_dirty(&mut self, attribute: ParticleAttribute) {
        *self.flag_mut(attribute) = true;
    }

    pub fn is_dirty(&self, attribute: ParticleAttribute) -> bool {
        match attribute {
            ParticleAttribute::Alive => self.alive.needs_upload,
            ParticleAttribute::Age => self.age.needs_upload,
            ParticleAttribute::Position => self.position.needs_upload,
            ParticleAttribute::Velocity => self.velocity.needs_upload,
            ParticleAttribute::Acceleration => self.acceleration.needs_upload,
            ParticleAttribute::Size => self.size.needs_upload,
            ParticleAttribute::ColorStart => self.color_start.needs_upload,
            ParticleAttribute::ColorMiddle => self.color_middle.needs_upload,
            ParticleAttribute::ColorEnd => self.color_end.needs_upload,
            ParticleAttribute::Opacity => self.opacity.needs_upload,
            ParticleAttribute::Angle => self.angle.needs_upload,
        }
    }

    /// Called by the upload step once it has consumed a buffer.
    pub fn clear_dirty(&mut self, attribute: ParticleAttribute) {
        *self.flag_mut(attribute) = false;
    }

    /// Attributes mutated since the last upload, in declaration order.
    pub fn dirty_attributes(&self) -> Vec<ParticleAttribute> {
        ParticleAttribute::ALL
            .iter()
            .copied()
            .filter(|&a| self.is_dirty(a))
            .collect()
    }

    /// Raw byte view of one attribute array for the upload step.
    pub fn attribute_bytes(&self, attribute: ParticleAttribute) -> &[u8] {
        match attribute {
            ParticleAttribute::Alive => self.alive.bytes(),
            ParticleAttribute::Age => self.age.bytes(),
            ParticleAttribute::Position => self.position.bytes(),
            ParticleAttribute::Velocity => self.velocity.bytes(),
            ParticleAttribute::Acceleration => self.acceleration.bytes(),
            ParticleAttribute::Size => self.size.bytes(),
            ParticleAttribute::ColorStart => self.color_start.bytes(),
            ParticleAttribute::ColorMiddle => self.color_middle.bytes(),
            ParticleAttribute::ColorEnd => self.color_end.bytes(),
            ParticleAttribute::Opacity => self.opacity.bytes(),
            ParticleAttribute::Angle => self.angle.bytes(),
        }
    }

    fn flag_mut(&mut self, attribute: ParticleAttribute) -> &mut bool {
        match attribute {
            ParticleAttribute::Alive => &mut self.alive.needs_upload,
            ParticleAttribute::Age => &mut self.age.needs_upload,
            ParticleAttribute::Position => &mut self.position.needs_upload,
            ParticleAttribute::Velocity => &mut self.velocity.needs_upload,
            ParticleAttribute::Acceleration => &mut self.acceleration.needs_upload,
            ParticleAttribute::Size => &mut self.size.needs_upload,
            ParticleAttribute::ColorStart => &mut self.color_start.needs_upload,
            ParticleAttribute::ColorMiddle => &mut self.color_middle.needs_upload,
            ParticleAttribute::ColorEnd => &mut self.color_end.needs_upload,
            ParticleAttribute::Opacity => &mut self.opacity.needs_upload,
            ParticleAttribute::Angle => &mut self.angle.needs_upload,
        }
    }
}
