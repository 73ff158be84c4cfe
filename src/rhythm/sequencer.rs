// Copyright (c) 2024 Mike Tsao

use super::EuclideanTrack;
use crate::{prelude::*, types::CrossbeamChannel};
use anyhow::anyhow;
use crossbeam::channel::Sender;
use delegate::delegate;
use log::warn;
use serde::{Deserialize, Serialize};

/// Changes that another thread (a UI, a MIDI controller) can ask an
/// [EuclideanSequencer] to make. They take effect at the start of the next
/// [Controls::work()], so a slice never sees half of an update.
#[derive(Clone, Debug, PartialEq)]
pub enum SequencerInput {
    /// Replace the rhythm of the track at this index.
    SetSpec(usize, SequenceSpec),
    /// Mute or unmute the track at this index.
    SetMuted(usize, bool),
}

/// A set of [EuclideanTrack]s that share a clock, like the voices of a drum
/// machine.
///
/// Tracks with different cycle lengths drift against each other, which is the
/// point. If `loop_count` is set, the performance ends after that many cycles
/// of the longest track.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EuclideanSequencer {
    tracks: Vec<EuclideanTrack>,

    #[serde(default)]
    loop_count: Option<usize>,

    #[serde(skip)]
    e: EuclideanSequencerEphemerals,
}
#[derive(Debug, Default)]
pub struct EuclideanSequencerEphemerals {
    inputs: CrossbeamChannel<SequencerInput>,
    c: Configurables,
    time_range: TimeRange,
    is_performing: bool,
    is_finished: bool,
}
impl EuclideanSequencer {
    /// Appends a track and returns its index.
    pub fn add_track(&mut self, track: EuclideanTrack) -> usize {
        self.tracks.push(track);
        self.tracks.len() - 1
    }

    /// Removes and returns the track at `index`. Later tracks shift down.
    pub fn remove_track(&mut self, index: usize) -> anyhow::Result<EuclideanTrack> {
        if index < self.tracks.len() {
            Ok(self.tracks.remove(index))
        } else {
            Err(anyhow!("no track at index {index}"))
        }
    }

    #[allow(missing_docs)]
    pub fn track(&self, index: usize) -> Option<&EuclideanTrack> {
        self.tracks.get(index)
    }

    #[allow(missing_docs)]
    pub fn track_mut(&mut self, index: usize) -> Option<&mut EuclideanTrack> {
        self.tracks.get_mut(index)
    }

    #[allow(missing_docs)]
    pub fn tracks(&self) -> &[EuclideanTrack] {
        &self.tracks
    }

    #[allow(missing_docs)]
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Changes one track's rhythm right away. Use [EuclideanSequencer::sender()]
    /// instead when calling from a different thread than the one doing the
    /// work.
    pub fn set_track_spec(&mut self, index: usize, spec: SequenceSpec) -> anyhow::Result<()> {
        let track = self
            .tracks
            .get_mut(index)
            .ok_or_else(|| anyhow!("no track at index {index}"))?;
        Ok(track.set_spec(spec)?)
    }

    /// The sending end of this sequencer's input queue.
    pub fn sender(&self) -> Sender<SequencerInput> {
        self.e.inputs.sender.clone()
    }

    #[allow(missing_docs)]
    pub fn loop_count(&self) -> Option<usize> {
        self.loop_count
    }

    /// Sets how many cycles of the longest track to play, or [None] to play
    /// forever.
    pub fn set_loop_count(&mut self, loop_count: Option<usize>) {
        self.loop_count = loop_count;
    }

    /// The cycle length of the longest track.
    pub fn cycle_duration(&self) -> MusicalTime {
        self.tracks
            .iter()
            .map(|t| t.cycle_duration())
            .max()
            .unwrap_or_default()
    }

    /// When the performance ends, if it ends. A loop too long to represent
    /// never ends.
    pub fn end_time(&self) -> Option<MusicalTime> {
        self.loop_count.and_then(|count| {
            self.cycle_duration()
                .total_units()
                .checked_mul(count)
                .map(MusicalTime::new_with_units)
        })
    }

    fn handle_pending_inputs(&mut self) {
        while let Ok(input) = self.e.inputs.receiver.try_recv() {
            self.handle_input(input);
        }
    }

    fn handle_input(&mut self, input: SequencerInput) {
        match input {
            SequencerInput::SetSpec(index, spec) => {
                // The track logs its own rejection.
                if let Err(e) = self.set_track_spec(index, spec) {
                    warn!("SetSpec({index}, {spec}) failed: {e}");
                }
            }
            SequencerInput::SetMuted(index, is_muted) => match self.tracks.get_mut(index) {
                Some(track) => track.set_is_muted(is_muted),
                None => warn!("SetMuted({index}) names a nonexistent track"),
            },
        }
    }
}
impl Configurable for EuclideanSequencer {
    delegate! {
        to self.e.c {
            fn tempo(&self) -> Tempo;
            fn update_tempo(&mut self, tempo: Tempo);
            fn time_signature(&self) -> TimeSignature;
            fn update_time_signature(&mut self, time_signature: TimeSignature);
        }
    }

    fn reset(&mut self) {
        self.e.is_finished = false;
        self.skip_to_start();
    }
}
impl Serializable for EuclideanSequencer {
    fn after_deser(&mut self) {
        self.tracks.iter_mut().for_each(|t| t.after_deser());
    }
}
impl Controls for EuclideanSequencer {
    fn time_range(&self) -> Option<TimeRange> {
        if self.e.is_performing {
            Some(self.e.time_range.clone())
        } else {
            None
        }
    }

    fn update_time_range(&mut self, time_range: &TimeRange) {
        let mut range = time_range.clone();
        if let Some(end_time) = self.end_time() {
            if range.start() >= end_time {
                self.e.is_finished = true;
            }
            range.0.end = range.0.end.min(end_time);
            range.0.start = range.0.start.min(range.0.end);
        }
        self.tracks
            .iter_mut()
            .for_each(|t| t.update_time_range(&range));
        self.e.time_range = range;
    }

    fn work(&mut self, control_events_fn: &mut ControlEventsFn) {
        self.handle_pending_inputs();
        if self.e.is_finished {
            // Stopped tracks use their next work() to release notes.
            self.tracks.iter_mut().for_each(|t| t.stop());
        }
        self.tracks
            .iter_mut()
            .for_each(|t| t.work(control_events_fn));
    }

    fn is_finished(&self) -> bool {
        self.e.is_finished || self.tracks.iter().all(|t| t.is_finished())
    }

    fn play(&mut self) {
        self.e.is_performing = true;
        self.tracks.iter_mut().for_each(|t| t.play());
    }

    fn stop(&mut self) {
        self.e.is_performing = false;
        self.tracks.iter_mut().for_each(|t| t.stop());
    }

    fn skip_to_start(&mut self) {
        self.e.time_range = TimeRange::default();
        self.e.is_finished = false;
        let is_performing = self.e.is_performing;
        self.tracks.iter_mut().for_each(|t| {
            t.skip_to_start();
            // Reaching the loop end stopped them.
            if is_performing {
                t.play();
            }
        });
    }

    fn is_performing(&self) -> bool {
        self.e.is_performing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use more_asserts::assert_gt;
    use std::thread;

    fn kit() -> EuclideanSequencer {
        let mut s = EuclideanSequencer::default();
        s.add_track(
            EuclideanTrack::new_with(SequenceSpec::new_with(16, 4, 0), MidiNote::KICK).unwrap(),
        );
        s.add_track(
            EuclideanTrack::new_with(SequenceSpec::new_with(8, 3, 0), MidiNote::SNARE).unwrap(),
        );
        s
    }

    fn note_ons_in(s: &mut EuclideanSequencer, range: TimeRange) -> Vec<u8> {
        let mut keys = Vec::default();
        s.update_time_range(&range);
        s.work(&mut |e| {
            if let WorkEvent::Midi(_, MidiMessage::NoteOn { key, .. }) = e {
                keys.push(key.as_int());
            }
        });
        keys
    }

    fn bar(n: usize) -> TimeRange {
        TimeRange::new_with_start_and_duration(
            MusicalTime::DURATION_WHOLE * n,
            MusicalTime::DURATION_WHOLE,
        )
    }

    #[test]
    fn tracks_play_together() {
        let mut s = kit();
        s.play();
        let keys = note_ons_in(&mut s, bar(0));
        assert_eq!(keys.iter().filter(|k| **k == 36).count(), 4);
        assert_eq!(
            keys.iter().filter(|k| **k == 38).count(),
            6,
            "E(3,8) in sixteenths fits twice in a bar"
        );
        assert!(!s.is_finished(), "loops forever without a loop count");
    }

    #[test]
    fn inputs_from_another_thread_apply_at_next_work() {
        let mut s = kit();
        s.play();
        let sender = s.sender();
        thread::spawn(move || {
            let _ = sender.send(SequencerInput::SetSpec(0, SequenceSpec::new_with(16, 8, 0)));
            let _ = sender.send(SequencerInput::SetMuted(1, true));
            let _ = sender.send(SequencerInput::SetSpec(9, SequenceSpec::new_with(4, 1, 0)));
            let _ = sender.send(SequencerInput::SetSpec(0, SequenceSpec::new_with(4, 9, 0)));
        })
        .join()
        .unwrap();

        assert_eq!(
            s.track(0).unwrap().spec(),
            SequenceSpec::new_with(16, 4, 0),
            "nothing changes until work()"
        );
        let keys = note_ons_in(&mut s, bar(0));
        assert_eq!(keys, vec![36; 8], "snare muted, kick doubled");
        assert_eq!(
            s.track(0).unwrap().spec(),
            SequenceSpec::new_with(16, 8, 0),
            "the bad update after the good one should have been rejected"
        );
    }

    #[test]
    fn loop_count_ends_performance() {
        let mut s = kit();
        // .x..x..x leaves the snare sounding at the end of each bar.
        s.set_track_spec(1, SequenceSpec::new_with(8, 3, 1)).unwrap();
        s.set_loop_count(Some(2));
        assert_eq!(s.end_time(), Some(MusicalTime::DURATION_WHOLE * 2));
        s.play();
        let first = note_ons_in(&mut s, bar(0));
        let second = note_ons_in(&mut s, bar(1));
        assert_eq!(first, second);
        assert!(!s.is_finished());

        let mut events = Vec::default();
        s.update_time_range(&bar(2));
        s.work(&mut |e| events.push(e));
        assert!(s.is_finished());
        assert_gt!(events.len(), 0, "sounding notes should be released");
        assert!(events
            .iter()
            .all(|e| matches!(e, WorkEvent::Midi(_, MidiMessage::NoteOff { .. }))));

        s.skip_to_start();
        assert!(!s.is_finished());
    }

    #[test]
    fn skip_to_start_replays_after_loop_end() {
        let mut s = kit();
        s.set_loop_count(Some(1));
        s.play();
        let first = note_ons_in(&mut s, bar(0));
        assert_eq!(first.len(), 4 + 6);
        assert!(note_ons_in(&mut s, bar(1)).is_empty());
        assert!(s.is_finished());

        s.skip_to_start();
        assert!(s.is_performing());
        assert!(!s.is_finished());
        assert_eq!(note_ons_in(&mut s, bar(0)), first);

        assert!(note_ons_in(&mut s, bar(1)).is_empty());
        s.reset();
        assert_eq!(note_ons_in(&mut s, bar(0)), first, "reset also rewinds");
    }

    #[test]
    fn huge_loop_count_never_ends() {
        let mut s = kit();
        s.set_loop_count(Some(usize::MAX));
        assert_eq!(s.end_time(), None);
        s.play();
        assert_eq!(note_ons_in(&mut s, bar(3)).len(), 4 + 6);
        assert!(!s.is_finished());
    }

    #[test]
    fn partial_last_slice_is_clipped() {
        let mut s = kit();
        s.set_loop_count(Some(1));
        s.play();
        let keys = note_ons_in(
            &mut s,
            TimeRange::new_with_start_and_duration(
                MusicalTime::START,
                MusicalTime::DURATION_WHOLE * 2,
            ),
        );
        assert_eq!(keys.len(), 4 + 6, "nothing past the first cycle");
    }

    #[test]
    fn track_management() {
        let mut s = kit();
        assert_eq!(s.track_count(), 2);
        assert_eq!(s.cycle_duration(), MusicalTime::DURATION_WHOLE);
        assert!(s.set_track_spec(1, SequenceSpec::new_with(8, 9, 0)).is_err());
        assert!(s.set_track_spec(5, SequenceSpec::new_with(8, 1, 0)).is_err());
        let removed = s.remove_track(0).unwrap();
        assert_eq!(removed.note(), MidiNote::KICK);
        assert!(s.remove_track(3).is_err());
        assert_eq!(s.cycle_duration(), MusicalTime::DURATION_SIXTEENTH * 8);

        let empty = EuclideanSequencer::default();
        assert!(empty.is_finished());
        assert_eq!(empty.cycle_duration(), MusicalTime::START);
    }

    #[test]
    fn configurable() {
        let mut s = EuclideanSequencer::default();
        assert_eq!(s.tempo(), Tempo::default());
        s.update_tempo(Tempo::from(96));
        assert_eq!(s.tempo(), Tempo::from(96));
    }
}
