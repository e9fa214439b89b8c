pub mod buffers;
pub mod emitter;
pub mod group;
pub mod random;

pub use buffers::{AttributeBuffer, AttributeBufferSet, ParticleAttribute};
pub use emitter::{CurveAttribute, Emitter, EmitterConfig, EmitterError, EmitterType};
pub use group::{EmitterId, GroupError, ParticleGroup};
