// Copyright (c) 2024 Mike Tsao

use serde::{Deserialize, Serialize};
use synonym::Synonym;

pub use midly::{
    num::{u4, u7},
    MidiMessage,
};

/// Newtype for MIDI channel.
#[derive(Synonym, Serialize, Deserialize)]
pub struct MidiChannel(pub u8);
#[allow(missing_docs)]
impl MidiChannel {
    pub const MIN_VALUE: u8 = 0;
    pub const MAX_VALUE: u8 = 15; // inclusive
    pub const DRUM_VALUE: u8 = 9;
    pub const DRUM: Self = Self(Self::DRUM_VALUE);

    pub const fn new(value: u8) -> Self {
        Self(value)
    }
}
impl From<u4> for MidiChannel {
    fn from(value: u4) -> Self {
        Self(value.as_int())
    }
}
impl From<MidiChannel> for u4 {
    fn from(value: MidiChannel) -> Self {
        u4::from_int_lossy(value.0.min(MidiChannel::MAX_VALUE))
    }
}

/// A MIDI note number, 0..=127. Middle C is 60.
#[derive(Synonym, Serialize, Deserialize)]
pub struct MidiNote(pub u8);
#[allow(missing_docs)]
impl MidiNote {
    pub const MIN_VALUE: u8 = 0;
    pub const MAX_VALUE: u8 = 127;

    // A few General MIDI percussion keys, for rhythm tracks.
    pub const KICK: Self = Self(36);
    pub const SNARE: Self = Self(38);
    pub const CLAP: Self = Self(39);
    pub const CLOSED_HAT: Self = Self(42);
    pub const OPEN_HAT: Self = Self(46);
    pub const RIM: Self = Self(37);
    pub const COWBELL: Self = Self(56);
}
impl From<MidiNote> for u7 {
    fn from(value: MidiNote) -> Self {
        u7::from_int_lossy(value.0.min(MidiNote::MAX_VALUE))
    }
}
