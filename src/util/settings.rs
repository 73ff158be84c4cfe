// Copyright (c) 2024 Mike Tsao

//! Structs that hold configuration information about a rhythm kit. Intended
//! to be serialized.

use crate::{prelude::*, rhythm::EuclideanTrackBuilder};
use anyhow::anyhow;
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One track's worth of [RhythmSettings].
#[derive(Clone, Debug, Derivative, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(rename_all = "kebab-case")]
pub struct TrackSettings {
    /// Either a preset name or an explicit spec; the preset wins if both are
    /// present, but the spec's offset still applies.
    #[serde(default)]
    pub preset: Option<EuclideanPreset>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub spec: SequenceSpec,

    #[derivative(Default(value = "MidiNote::KICK"))]
    #[serde(default = "TrackSettings::default_note")]
    #[allow(missing_docs)]
    pub note: MidiNote,

    #[derivative(Default(value = "100"))]
    #[serde(default = "TrackSettings::default_velocity")]
    #[allow(missing_docs)]
    pub velocity: u8,

    #[derivative(Default(value = "MidiChannel::DRUM"))]
    #[serde(default = "TrackSettings::default_channel")]
    #[allow(missing_docs)]
    pub channel: MidiChannel,

    /// Steps per whole note. 16 means each step is a sixteenth note.
    #[derivative(Default(value = "16"))]
    #[serde(default = "TrackSettings::default_division")]
    pub division: usize,
}
impl TrackSettings {
    fn default_note() -> MidiNote {
        MidiNote::KICK
    }
    fn default_velocity() -> u8 {
        100
    }
    fn default_channel() -> MidiChannel {
        MidiChannel::DRUM
    }
    fn default_division() -> usize {
        16
    }

    /// The spec this track will play, after applying any preset.
    pub fn effective_spec(&self) -> SequenceSpec {
        match self.preset {
            Some(preset) => SequenceSpec {
                offset: self.spec.offset,
                ..preset.spec()
            },
            None => self.spec,
        }
    }

    /// Builds a playable [EuclideanTrack].
    pub fn to_track(&self) -> anyhow::Result<EuclideanTrack> {
        if self.division == 0 {
            return Err(anyhow!("division must be at least 1"));
        }
        EuclideanTrackBuilder::default()
            .spec(self.effective_spec())
            .note(self.note)
            .velocity(self.velocity)
            .channel(self.channel)
            .step_duration(MusicalTime::DURATION_WHOLE / self.division)
            .build()
    }
}

/// Contains everything needed to recreate an [EuclideanSequencer].
#[derive(Debug, Derivative, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(rename_all = "kebab-case")]
pub struct RhythmSettings {
    #[serde(default)]
    tempo: Tempo,

    /// Doesn't change playback, since each track has its own cycle length.
    /// It's written to exported MIDI files so that notation software draws
    /// the right bar lines.
    #[serde(default)]
    time_signature: TimeSignature,

    #[serde(default)]
    loop_count: Option<usize>,

    #[serde(default)]
    tracks: Vec<TrackSettings>,

    #[serde(skip)]
    has_been_saved: bool,
}
impl HasSettings for RhythmSettings {
    fn has_been_saved(&self) -> bool {
        self.has_been_saved
    }

    fn needs_save(&mut self) {
        self.has_been_saved = false;
    }

    fn mark_clean(&mut self) {
        self.has_been_saved = true;
    }
}
impl RhythmSettings {
    #[allow(missing_docs)]
    pub fn load_from_json(json: &str) -> anyhow::Result<Self> {
        let mut settings = serde_json::from_str::<Self>(json)?;
        settings.mark_clean();
        Ok(settings)
    }

    #[allow(missing_docs)]
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::load_from_json(json.as_str())
    }

    #[allow(missing_docs)]
    pub fn save(&mut self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self)?;
        std::fs::write(path, json)?;
        self.mark_clean();
        Ok(())
    }

    #[allow(missing_docs)]
    pub fn tempo(&self) -> Tempo {
        self.tempo
    }

    /// Updates the field and marks the struct eligible to save.
    pub fn set_tempo(&mut self, tempo: Tempo) {
        if tempo != self.tempo {
            self.tempo = tempo;
            self.needs_save();
        }
    }

    #[allow(missing_docs)]
    pub fn time_signature(&self) -> TimeSignature {
        self.time_signature
    }

    /// Updates the field and marks the struct eligible to save.
    pub fn set_time_signature(&mut self, time_signature: TimeSignature) {
        if time_signature != self.time_signature {
            self.time_signature = time_signature;
            self.needs_save();
        }
    }

    #[allow(missing_docs)]
    pub fn loop_count(&self) -> Option<usize> {
        self.loop_count
    }

    /// Updates the field and marks the struct eligible to save.
    pub fn set_loop_count(&mut self, loop_count: Option<usize>) {
        if loop_count != self.loop_count {
            self.loop_count = loop_count;
            self.needs_save();
        }
    }

    #[allow(missing_docs)]
    pub fn tracks(&self) -> &[TrackSettings] {
        &self.tracks
    }

    /// Adds a track and marks the struct eligible to save.
    pub fn add_track(&mut self, track: TrackSettings) {
        self.tracks.push(track);
        self.needs_save();
    }

    /// Builds an [EuclideanSequencer] configured as described. Fails if any
    /// track is unplayable.
    pub fn to_sequencer(&self) -> anyhow::Result<EuclideanSequencer> {
        let mut sequencer = EuclideanSequencer::default();
        sequencer.update_tempo(self.tempo);
        sequencer.update_time_signature(self.time_signature);
        sequencer.set_loop_count(self.loop_count);
        for (i, track) in self.tracks.iter().enumerate() {
            let track = track
                .to_track()
                .map_err(|e| anyhow!("track {i}: {e}"))?;
            sequencer.add_track(track);
        }
        Ok(sequencer)
    }
}
