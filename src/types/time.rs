// Copyright (c) 2024 Mike Tsao

//! Handles wall-clock and musical time.

use anyhow::{anyhow, Error};
use core::{
    fmt::{self, Display},
    ops::{Add, Div, Mul},
};
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use synonym::Synonym;

/// Beats per minute.
#[derive(Synonym, Serialize, Deserialize, Derivative)]
#[derivative(Default)]
#[synonym(skip(Default, Display))]
#[serde(rename_all = "kebab-case")]
pub struct Tempo(#[derivative(Default(value = "128.0"))] pub f64);
impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{:0.2} BPM", self.0))
    }
}
impl From<u16> for Tempo {
    fn from(value: u16) -> Self {
        Self(value as f64)
    }
}
impl Tempo {
    /// The largest value we'll allow.
    pub const MAX_VALUE: f64 = 1024.0;

    /// The smallest value we'll allow. Zero would mean time never advances.
    pub const MIN_VALUE: f64 = 1.0;

    /// Beats per second.
    pub fn bps(&self) -> f64 {
        self.0 / 60.0
    }

    /// Microseconds per beat, which is how Standard MIDI Files express tempo.
    pub fn micros_per_beat(&self) -> u32 {
        (60_000_000.0 / self.0.clamp(Self::MIN_VALUE, Self::MAX_VALUE)).round() as u32
    }

    /// MIN..=MAX
    pub const fn range() -> core::ops::RangeInclusive<f64> {
        Self::MIN_VALUE..=Self::MAX_VALUE
    }
}

/// [TimeSignature] represents a music [time
/// signature](https://en.wikipedia.org/wiki/Time_signature).
///
/// The top number tells how many beats are in a measure. The bottom number
/// tells the value of a beat; 4 means a quarter note gets the beat.
#[derive(Clone, Copy, Debug, Derivative, Eq, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(rename_all = "kebab-case")]
pub struct TimeSignature {
    /// The number of beats in a measure.
    #[derivative(Default(value = "4"))]
    pub top: usize,

    /// The value of a beat, as a reciprocal.
    #[derivative(Default(value = "4"))]
    pub bottom: usize,
}
impl Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{}/{}", self.top, self.bottom))
    }
}
#[allow(missing_docs)]
impl TimeSignature {
    /// C time = common time = 4/4
    pub const COMMON_TIME: Self = TimeSignature { top: 4, bottom: 4 };

    pub fn new_with(top: usize, bottom: usize) -> anyhow::Result<Self, Error> {
        if top == 0 {
            Err(anyhow!("Time signature top can't be zero."))
        } else if !bottom.is_power_of_two() || bottom > 512 {
            Err(anyhow!("Time signature bottom was out of range."))
        } else {
            Ok(Self { top, bottom })
        }
    }

    /// The length of one bar.
    pub fn duration(&self) -> MusicalTime {
        MusicalTime::new_with_beats(self.top)
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn bottom(&self) -> usize {
        self.bottom
    }
}

/// [MusicalTime] is the universal unit of time. It is in terms of musical
/// beats. A "part" is a sixteenth of a beat, and a "unit" is 1/4096 of a part.
/// Thus, beats are divided into 65,536 units.
#[derive(Synonym, Serialize, Deserialize)]
#[synonym(skip(Display))]
pub struct MusicalTime(usize);

#[allow(missing_docs)]
impl MusicalTime {
    /// A part is a sixteenth of a beat.
    pub const PARTS_IN_BEAT: usize = 16;
    pub const UNITS_IN_PART: usize = 4096;
    pub const UNITS_IN_BEAT: usize = Self::PARTS_IN_BEAT * Self::UNITS_IN_PART;

    pub const DURATION_WHOLE: MusicalTime = Self::new_with_beats(4);
    pub const DURATION_HALF: MusicalTime = Self::new_with_beats(2);
    pub const DURATION_QUARTER: MusicalTime = Self::new_with_beats(1);
    pub const DURATION_EIGHTH: MusicalTime = Self::new_with_parts(8);
    pub const DURATION_SIXTEENTH: MusicalTime = Self::new_with_parts(4);
    pub const DURATION_ZERO: MusicalTime = Self::START;
    pub const TIME_MAX: MusicalTime = Self::new_with_units(usize::MAX);

    pub const ONE_PART: MusicalTime = Self::new_with_parts(1);
    pub const ONE_UNIT: MusicalTime = Self::new_with_units(1);
    pub const ONE_BEAT: MusicalTime = Self::new_with_beats(1);

    pub const START: MusicalTime = Self::new_with_units(0);

    // The entire number expressed in beats.
    pub fn total_beats(&self) -> usize {
        self.0 / Self::UNITS_IN_BEAT
    }

    // The entire number expressed in parts.
    pub fn total_parts(&self) -> usize {
        self.0 / Self::UNITS_IN_PART
    }

    // A part is one sixteenth of a beat.
    pub fn parts(&self) -> usize {
        self.total_parts() % Self::PARTS_IN_BEAT
    }

    pub const fn total_units(&self) -> usize {
        self.0
    }

    pub const fn units(&self) -> usize {
        self.0 % Self::UNITS_IN_PART
    }

    pub const fn new_with_beats(beats: usize) -> Self {
        Self::new_with_units(beats * Self::UNITS_IN_BEAT)
    }

    pub const fn new_with_parts(parts: usize) -> Self {
        Self::new_with_units(parts * Self::UNITS_IN_PART)
    }

    pub const fn new_with_units(units: usize) -> Self {
        Self(units)
    }

    /// Converts to ticks at the given resolution (ticks per beat), rounding
    /// to the nearest tick.
    pub fn as_ticks(&self, ticks_per_beat: usize) -> usize {
        (self.0 * ticks_per_beat + Self::UNITS_IN_BEAT / 2) / Self::UNITS_IN_BEAT
    }

    /// Returns true if the value is zero. This is valid because we sometimes
    /// use [MusicalTime] to represent durations from time zero.
    pub const fn is_empty(&self) -> bool {
        self.0 == MusicalTime::START.0
    }
}
impl Display for MusicalTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{:5}.{:02}.{:05}",
            self.total_beats() + 1,
            self.parts(),
            self.units()
        )
    }
}
impl Add<usize> for MusicalTime {
    type Output = Self;

    fn add(self, rhs: usize) -> Self::Output {
        Self(self.0 + rhs)
    }
}
impl Mul<usize> for MusicalTime {
    type Output = Self;

    fn mul(self, rhs: usize) -> Self::Output {
        Self(self.0 * rhs)
    }
}
impl Div<usize> for MusicalTime {
    type Output = Self;

    fn div(self, rhs: usize) -> Self::Output {
        Self(self.0 / rhs)
    }
}

/// A [TimeRange] describes a half-open range of [MusicalTime]. Its principal
/// usage is to determine which time slice to handle during
/// [Controls::work()](crate::traits::Controls::work()).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TimeRange(pub core::ops::Range<MusicalTime>);
impl TimeRange {
    /// Creates a new [TimeRange] with the given absolute start and end.
    pub fn new_with_start_and_end(start: MusicalTime, end: MusicalTime) -> Self {
        Self(start..end)
    }

    /// Creates a new [TimeRange] with the given absolute start and (relative)
    /// duration.
    pub fn new_with_start_and_duration(start: MusicalTime, duration: MusicalTime) -> Self {
        Self(start..(start + duration))
    }

    /// Adds to both start and end.
    pub fn translate(&self, delta: MusicalTime) -> TimeRange {
        TimeRange(self.0.start + delta..self.0.end + delta)
    }

    /// The distance from start to end.
    pub fn duration(&self) -> MusicalTime {
        self.0.end - self.0.start
    }

    #[allow(missing_docs)]
    pub fn start(&self) -> MusicalTime {
        self.0.start
    }

    #[allow(missing_docs)]
    pub fn end(&self) -> MusicalTime {
        self.0.end
    }

    #[allow(missing_docs)]
    pub fn contains(&self, item: &MusicalTime) -> bool {
        self.0.contains(item)
    }
}
