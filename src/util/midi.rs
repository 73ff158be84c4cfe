// Copyright (c) 2024 Mike Tsao

use crate::types::{u7, MidiMessage, MidiNote};

/// Provides MIDI-related utility functionality.
///
/// Out-of-range keys and velocities are clamped to 127 rather than wrapped,
/// so a too-loud note never turns into a silent one.
pub struct MidiUtils {}
impl MidiUtils {
    /// Convenience function to make a note-on [MidiMessage].
    pub fn new_note_on(note: u8, vel: u8) -> MidiMessage {
        MidiMessage::NoteOn {
            key: u7::from(MidiNote(note)),
            vel: Self::clamped(vel),
        }
    }

    /// Convenience function to make a note-off [MidiMessage].
    pub fn new_note_off(note: u8, vel: u8) -> MidiMessage {
        MidiMessage::NoteOff {
            key: u7::from(MidiNote(note)),
            vel: Self::clamped(vel),
        }
    }

    fn clamped(value: u8) -> u7 {
        u7::from_int_lossy(value.min(MidiNote::MAX_VALUE))
    }

    /// Whether the message starts a note. A note-on with zero velocity is
    /// really a note-off.
    pub fn is_note_start(message: &MidiMessage) -> bool {
        matches!(message, MidiMessage::NoteOn { vel, .. } if vel.as_int() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_messages() {
        let on = MidiUtils::new_note_on(60, 127);
        assert!(MidiUtils::is_note_start(&on));
        assert!(!MidiUtils::is_note_start(&MidiUtils::new_note_on(60, 0)));
        assert!(!MidiUtils::is_note_start(&MidiUtils::new_note_off(60, 64)));
        assert_eq!(
            MidiUtils::new_note_off(60, 0),
            MidiMessage::NoteOff {
                key: u7::from_int_lossy(60),
                vel: u7::from_int_lossy(0),
            }
        );
    }

    #[test]
    fn out_of_range_values_clamp() {
        assert_eq!(
            MidiUtils::new_note_on(200, 128),
            MidiMessage::NoteOn {
                key: u7::from_int_lossy(127),
                vel: u7::from_int_lossy(127),
            }
        );
        assert!(MidiUtils::is_note_start(&MidiUtils::new_note_on(36, 128)));
    }
}
