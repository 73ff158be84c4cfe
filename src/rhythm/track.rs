// Copyright (c) 2024 Mike Tsao

use crate::{error::Error, prelude::*, util::MidiUtils};
use derivative::Derivative;
use derive_builder::Builder;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Plays one Euclidean rhythm on one MIDI note, looping forever.
///
/// Step `k` (counting from [MusicalTime::START]) begins at `k *
/// step_duration` and reads slot `k mod steps` of the current [Sequence]. A
/// pulse sends note-on at the start of its step and note-off at the start of
/// the next one.
#[derive(Debug, Derivative, Builder, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(default, rename_all = "kebab-case")]
#[builder(build_fn(private, name = "build_from_builder"))]
pub struct EuclideanTrack {
    /// What to generate.
    #[builder(default)]
    spec: SequenceSpec,

    /// Which key to strike on each pulse.
    #[derivative(Default(value = "MidiNote::KICK"))]
    #[builder(default = "MidiNote::KICK")]
    note: MidiNote,

    /// Note-on velocity, at most [EuclideanTrack::MAX_VELOCITY]. Zero
    /// silences the track.
    #[derivative(Default(value = "100"))]
    #[builder(default = "100")]
    velocity: u8,

    /// Defaults to the General MIDI drum channel.
    #[derivative(Default(value = "MidiChannel::DRUM"))]
    #[builder(default = "MidiChannel::DRUM")]
    channel: MidiChannel,

    /// How long each step lasts.
    #[derivative(Default(value = "MusicalTime::DURATION_SIXTEENTH"))]
    #[builder(default = "MusicalTime::DURATION_SIXTEENTH")]
    step_duration: MusicalTime,

    /// Muted tracks keep time but don't play.
    #[serde(default)]
    #[builder(default)]
    is_muted: bool,

    #[serde(skip)]
    #[builder(setter(skip))]
    e: EuclideanTrackEphemerals,
}
#[derive(Debug, Default)]
pub struct EuclideanTrackEphemerals {
    sequence: Arc<Sequence>,
    time_range: TimeRange,
    is_performing: bool,

    // What the last note-on was sent to. Releasing goes here even if the
    // note or channel has changed since.
    sounding_note: Option<(MidiChannel, MidiNote)>,
}
impl EuclideanTrackBuilder {
    /// Builds the [EuclideanTrack] and generates its first [Sequence].
    pub fn build(&self) -> anyhow::Result<EuclideanTrack> {
        let mut track = self.build_from_builder()?;
        track.velocity = track.velocity.min(EuclideanTrack::MAX_VELOCITY);
        track.regenerate()?;
        Ok(track)
    }
}
impl EuclideanTrack {
    /// The loudest note-on MIDI can express.
    pub const MAX_VELOCITY: u8 = 127;

    /// Creates a track that plays `spec` on `note` with default settings
    /// otherwise.
    pub fn new_with(spec: SequenceSpec, note: MidiNote) -> Result<Self, Error> {
        let mut r = Self {
            spec,
            note,
            ..Default::default()
        };
        r.regenerate()?;
        Ok(r)
    }

    fn regenerate(&mut self) -> Result<(), Error> {
        self.e.sequence = Arc::new(self.spec.generate()?);
        Ok(())
    }

    /// Replaces the rhythm. On failure the previous spec and [Sequence]
    /// remain in effect.
    pub fn set_spec(&mut self, spec: SequenceSpec) -> Result<(), Error> {
        match spec.generate() {
            Ok(sequence) => {
                debug!("{} -> {}", spec, sequence);
                self.spec = spec;
                self.e.sequence = Arc::new(sequence);
                Ok(())
            }
            Err(e) => {
                warn!("keeping {} after rejecting {}: {}", self.spec, spec, e);
                Err(e)
            }
        }
    }

    #[allow(missing_docs)]
    pub fn spec(&self) -> SequenceSpec {
        self.spec
    }

    /// A snapshot of the current rhythm. It stays intact even if the track
    /// later switches to a different one.
    pub fn sequence(&self) -> Arc<Sequence> {
        Arc::clone(&self.e.sequence)
    }

    #[allow(missing_docs)]
    pub fn note(&self) -> MidiNote {
        self.note
    }

    #[allow(missing_docs)]
    pub fn set_note(&mut self, note: MidiNote) {
        self.note = note;
    }

    #[allow(missing_docs)]
    pub fn velocity(&self) -> u8 {
        self.velocity
    }

    /// Values above [EuclideanTrack::MAX_VELOCITY] are clamped.
    pub fn set_velocity(&mut self, velocity: u8) {
        if velocity > Self::MAX_VELOCITY {
            warn!("clamping velocity {velocity} to {}", Self::MAX_VELOCITY);
        }
        self.velocity = velocity.min(Self::MAX_VELOCITY);
    }

    #[allow(missing_docs)]
    pub fn channel(&self) -> MidiChannel {
        self.channel
    }

    #[allow(missing_docs)]
    pub fn set_channel(&mut self, channel: MidiChannel) {
        self.channel = channel;
    }

    #[allow(missing_docs)]
    pub fn step_duration(&self) -> MusicalTime {
        self.step_duration
    }

    /// Sets the length of a step. Zero-length steps are ignored.
    pub fn set_step_duration(&mut self, step_duration: MusicalTime) {
        if step_duration.is_empty() {
            warn!("ignoring zero step duration");
        } else {
            self.step_duration = step_duration;
        }
    }

    #[allow(missing_docs)]
    pub fn is_muted(&self) -> bool {
        self.is_muted
    }

    /// Muted tracks keep counting steps but don't send note-ons.
    pub fn set_is_muted(&mut self, is_muted: bool) {
        self.is_muted = is_muted;
    }

    /// How long one full cycle of the rhythm lasts.
    pub fn cycle_duration(&self) -> MusicalTime {
        self.step_duration * self.spec.steps
    }

    /// The index of the first step that starts at or after `time`.
    fn first_step_at_or_after(&self, time: MusicalTime) -> usize {
        let step_units = self.step_duration.total_units();
        (time.total_units() + step_units - 1) / step_units
    }

    fn release_note(&mut self, control_events_fn: &mut ControlEventsFn) {
        if let Some((channel, note)) = self.e.sounding_note.take() {
            control_events_fn(WorkEvent::Midi(channel, MidiUtils::new_note_off(note.0, 0)));
        }
    }
}
impl Serializable for EuclideanTrack {
    fn after_deser(&mut self) {
        self.velocity = self.velocity.min(Self::MAX_VELOCITY);
        if let Err(e) = self.regenerate() {
            warn!("loaded track has an unplayable rhythm: {e}");
        }
    }
}
impl Controls for EuclideanTrack {
    fn time_range(&self) -> Option<TimeRange> {
        if self.e.is_performing {
            Some(self.e.time_range.clone())
        } else {
            None
        }
    }

    fn update_time_range(&mut self, time_range: &TimeRange) {
        self.e.time_range = time_range.clone();
    }

    fn work(&mut self, control_events_fn: &mut ControlEventsFn) {
        if !self.e.is_performing {
            self.release_note(control_events_fn);
            return;
        }
        if self.step_duration.is_empty() {
            return;
        }

        // Hold our own reference so that a concurrent set_spec() can't change
        // the rhythm partway through this slice.
        let sequence = self.sequence();
        let mut step = self.first_step_at_or_after(self.e.time_range.start());
        while self.e.time_range.contains(&(self.step_duration * step)) {
            self.release_note(control_events_fn);
            if !self.is_muted && self.velocity != 0 && sequence.is_pulse_at_beat(step) {
                control_events_fn(WorkEvent::Midi(
                    self.channel,
                    MidiUtils::new_note_on(self.note.0, self.velocity),
                ));
                self.e.sounding_note = Some((self.channel, self.note));
            }
            step += 1;
        }
    }

    fn is_finished(&self) -> bool {
        self.spec.steps == 0
    }

    fn play(&mut self) {
        self.e.is_performing = true;
    }

    fn stop(&mut self) {
        self.e.is_performing = false;
    }

    fn skip_to_start(&mut self) {
        self.e.time_range = TimeRange::default();
    }

    fn is_performing(&self) -> bool {
        self.e.is_performing
    }
}
