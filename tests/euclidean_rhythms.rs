// Copyright (c) 2024 Mike Tsao

use ensnare_euclid::{prelude::*, util::export_to_smf};
use std::{sync::Arc, thread};

fn as_bools(s: &str) -> Vec<bool> {
    s.chars().map(|c| c == 'x').collect()
}

// The published examples of Euclidean rhythms.
#[test]
fn golden_patterns() {
    assert_eq!(generate(8, 0, 0).unwrap().as_slice(), &[false; 8]);
    assert_eq!(generate(5, 5, 0).unwrap().as_slice(), &[true; 5]);
    assert_eq!(
        Vec::<bool>::from(generate(8, 3, 0).unwrap()),
        as_bools("x..x..x.")
    );
    assert_eq!(
        Vec::<bool>::from(generate(16, 4, 0).unwrap()),
        as_bools("x...x...x...x...")
    );
    assert_eq!(
        Vec::<bool>::from(generate(4, 2, 0).unwrap()),
        as_bools("x.x.")
    );
    assert!(generate(0, 0, 0).unwrap().is_empty());
}

#[test]
fn invalid_pulses() {
    for (steps, pulses) in [(4, 5), (4, -1), (0, 1), (16, i64::MAX), (16, i64::MIN)] {
        match generate(steps, pulses, 0) {
            Err(Error::InvalidArgument {
                steps: s,
                pulses: p,
            }) => {
                assert_eq!((s, p), (steps, pulses));
            }
            other => panic!("E({pulses},{steps}) should be rejected, got {other:?}"),
        }
    }
}

#[test]
fn rotation_and_periodicity() {
    for steps in 1..=24usize {
        for pulses in 0..=steps as i64 {
            let base = generate(steps, pulses, 0).unwrap();
            for offset in -30..30i64 {
                let rotated = generate(steps, pulses, offset).unwrap();
                assert_eq!(
                    rotated,
                    base.rotated_right(offset.rem_euclid(steps as i64) as usize)
                );
                assert_eq!(
                    rotated,
                    generate(steps, pulses, offset + steps as i64).unwrap()
                );
                assert_eq!(rotated.pulse_count(), pulses as usize);
            }
        }
    }
}

// A rhythm host publishes new sequences by swapping an Arc, so readers on
// other threads always see one complete sequence or the other.
#[test]
fn published_sequences_are_never_torn() {
    let mut track =
        EuclideanTrack::new_with(SequenceSpec::new_with(16, 4, 0), MidiNote::KICK).unwrap();
    let old = track.sequence();
    let reader = {
        let old = Arc::clone(&old);
        thread::spawn(move || {
            (0..1000).all(|beat| old.is_pulse_at_beat(beat) == (beat % 4 == 0))
        })
    };
    track.set_spec(SequenceSpec::new_with(16, 5, 0)).unwrap();
    assert!(reader.join().unwrap());
    assert_eq!(old.pulse_count(), 4);
    assert_eq!(track.sequence().pulse_count(), 5);
}

#[test]
fn kit_from_settings_to_midi_file() {
    let settings = RhythmSettings::load_from_json(
        r#"{
            "tempo": 110.0,
            "tracks": [
                { "preset": "bossa-nova", "note": 36 },
                { "spec": { "steps": 16, "pulses": 7, "offset": 1 }, "note": 42, "velocity": 64 },
                { "spec": { "steps": 12, "pulses": 5 }, "note": 37 }
            ]
        }"#,
    )
    .unwrap();
    let mut sequencer = settings.to_sequencer().unwrap();
    assert_eq!(sequencer.track_count(), 3);

    let smf = export_to_smf(&mut sequencer, 3).unwrap();
    let mut note_ons = [0usize; 128];
    let mut sounding = [false; 128];
    for event in smf.tracks[0].iter() {
        if let midly::TrackEventKind::Midi { message, .. } = event.kind {
            match message {
                MidiMessage::NoteOn { key, vel } if vel.as_int() > 0 => {
                    assert!(
                        !sounding[key.as_int() as usize],
                        "overlapping notes on {}",
                        key.as_int()
                    );
                    sounding[key.as_int() as usize] = true;
                    note_ons[key.as_int() as usize] += 1;
                }
                MidiMessage::NoteOff { key, .. } => {
                    sounding[key.as_int() as usize] = false;
                }
                _ => {}
            }
        }
    }
    assert!(sounding.iter().all(|s| !s), "every note should be released");
    assert_eq!(note_ons[36], 5 * 3);
    assert_eq!(note_ons[42], 7 * 3);
    assert_eq!(
        note_ons[37],
        5 * 4,
        "the 12-step track fits four times into three 16-step cycles"
    );

    let ticks: u32 = smf.tracks[0].iter().map(|e| e.delta.as_int()).sum();
    assert_eq!(ticks, 960 * 4 * 3);
}
