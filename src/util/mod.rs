// Copyright (c) 2024 Mike Tsao

//! System utilities.

/// Commonly used imports.
pub mod prelude {
    pub use super::{
        rng::Rng,
        settings::{RhythmSettings, TrackSettings},
    };
}

pub use midi::MidiUtils;
pub use rng::Rng;
pub use settings::{RhythmSettings, TrackSettings};
pub use smf::{export_to_smf, save_smf, TICKS_PER_BEAT};

mod midi;
mod rng;
mod settings;
mod smf;
