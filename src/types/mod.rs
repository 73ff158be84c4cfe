// Copyright (c) 2024 Mike Tsao

//! Common data types used throughout the system.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{
        MidiChannel, MidiMessage, MidiNote, MusicalTime, Sequence, SequenceSpec,
        SequenceSpecBuilder, Tempo, TimeRange, TimeSignature,
    };
}

pub use {
    channels::CrossbeamChannel,
    midi::{u4, u7, MidiChannel, MidiMessage, MidiNote},
    sequence::{Sequence, SequenceSpec, SequenceSpecBuilder, SequenceSpecBuilderError},
    time::{MusicalTime, Tempo, TimeRange, TimeSignature},
};

mod channels;
mod midi;
mod sequence;
mod time;
