// Copyright (c) 2024 Mike Tsao

//! The traits that connect rhythm generators to whatever drives them.

use crate::types::{MidiChannel, MidiMessage, Tempo, TimeRange, TimeSignature};

/// Quick import of all important traits.
pub mod prelude {
    pub use super::{
        Configurable, Configurables, ControlEventsFn, Controls, HasSettings, Serializable,
        WorkEvent,
    };
}

/// A convenience struct for the fields implied by [Configurable]. Note that
/// this struct is not serde-compliant, because these fields typically aren't
/// meant to be serialized.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Configurables {
    tempo: Tempo,
    time_signature: TimeSignature,
}
impl Configurable for Configurables {
    fn tempo(&self) -> Tempo {
        self.tempo
    }

    fn update_tempo(&mut self, tempo: Tempo) {
        self.tempo = tempo
    }

    fn time_signature(&self) -> TimeSignature {
        self.time_signature
    }

    fn update_time_signature(&mut self, time_signature: TimeSignature) {
        self.time_signature = time_signature
    }
}

/// Something that is [Configurable] is interested in staying in sync with
/// global configuration.
pub trait Configurable {
    /// Returns this item's [Tempo].
    fn tempo(&self) -> Tempo {
        unimplemented!("Someone forgot to implement tempo()")
    }

    /// Tempo (beats per minute) changed.
    #[allow(unused_variables)]
    fn update_tempo(&mut self, tempo: Tempo) {}

    /// Returns this item's [TimeSignature].
    fn time_signature(&self) -> TimeSignature {
        unimplemented!("Someone forgot to implement time_signature()")
    }

    /// The global time signature changed. Euclidean tracks usually ignore
    /// it, since their cycle length is their own, but they still want to know.
    #[allow(unused_variables)]
    fn update_time_signature(&mut self, time_signature: TimeSignature) {}

    /// Sent to indicate that it's time to reset internal state.
    fn reset(&mut self) {}
}

/// Implementers of [Controls] produce these events.
#[derive(Clone, Debug, PartialEq)]
pub enum WorkEvent {
    /// A MIDI message sent to a channel.
    Midi(MidiChannel, MidiMessage),
}

/// Passes [WorkEvent]s from [Controls::work()] back to the caller.
pub type ControlEventsFn<'a> = dyn FnMut(WorkEvent) + 'a;

/// Something that [Controls] has a performance that progresses over time and
/// knows how to respond to requests to start, stop, restart, and seek within
/// the performance.
#[allow(unused_variables)]
pub trait Controls: Send {
    /// Returns the current [MusicalTime](crate::types::MusicalTime) range, or
    /// [None] if not performing or not applicable.
    fn time_range(&self) -> Option<TimeRange> {
        None
    }

    /// Sets the range of [MusicalTime](crate::types::MusicalTime) to which the
    /// next [Controls::work()] method applies.
    fn update_time_range(&mut self, time_range: &TimeRange) {}

    /// Performs work for the time range specified in the previous
    /// [Controls::update_time_range()]. If the work produces any events,
    /// calling `control_events_fn` hands them to the caller.
    fn work(&mut self, control_events_fn: &mut ControlEventsFn) {}

    /// Indicates whether this entity has completed all its scheduled work.
    /// Something that loops forever should return false while performing.
    fn is_finished(&self) -> bool {
        true
    }

    /// Tells the entity to play its performance from the current location.
    fn play(&mut self) {}

    /// Tells the device to stop playing its performance. It shouldn't change
    /// its cursor location, so that a [Controls::play()] after a
    /// [Controls::stop()] acts like a resume.
    fn stop(&mut self) {}

    /// Resets cursors to the beginning.
    fn skip_to_start(&mut self) {}

    /// Whether the entity is currently playing.
    fn is_performing(&self) -> bool {
        false
    }
}

/// Something that is [Serializable] might need to do work right before
/// serialization, or right after deserialization. These are the hooks.
pub trait Serializable {
    /// Called just before saving to disk.
    fn before_ser(&mut self) {}
    /// Called just after loading from disk.
    fn after_deser(&mut self) {}
}

/// Tracks whether persistent settings have changed since they were last
/// written.
pub trait HasSettings {
    /// Whether the current state of this struct has been saved to disk.
    fn has_been_saved(&self) -> bool;
    /// Call this whenever the struct changes.
    fn needs_save(&mut self);
    /// Call this after a load() or a save().
    fn mark_clean(&mut self);
}
