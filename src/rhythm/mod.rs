// Copyright (c) 2024 Mike Tsao

//! Euclidean rhythms: generating them, and playing them.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{
        generate, generate_spec, EuclideanPreset, EuclideanSequencer, EuclideanTrack,
        EuclideanTrackBuilder, SequencerInput,
    };
}

pub use euclidean::{generate, generate_spec};
pub use presets::EuclideanPreset;
pub use sequencer::{EuclideanSequencer, SequencerInput};
pub use track::{EuclideanTrack, EuclideanTrackBuilder, EuclideanTrackBuilderError};

mod euclidean;
mod presets;
mod sequencer;
mod track;
