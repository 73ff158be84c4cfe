// Copyright (c) 2024 Mike Tsao

//! Renders a rhythm performance into a Standard MIDI File.

use crate::{prelude::*, types::u4};
use anyhow::anyhow;
use midly::{
    num::{u15, u24, u28},
    Format, Header, MetaMessage, Smf, Timing, TrackEvent, TrackEventKind,
};
use std::path::Path;

/// Ticks per quarter note in exported files.
pub const TICKS_PER_BEAT: u16 = 960;

/// Performs `cycles` cycles of the sequencer's longest track and records the
/// result as a single-track (format 0) [Smf].
///
/// The sequencer is rewound before and after.
pub fn export_to_smf(
    sequencer: &mut EuclideanSequencer,
    cycles: usize,
) -> anyhow::Result<Smf<'static>> {
    let end_time = sequencer
        .cycle_duration()
        .total_units()
        .checked_mul(cycles)
        .map(MusicalTime::new_with_units)
        .ok_or_else(|| anyhow!("{cycles} cycles is too long to export"))?;
    let end_time = sequencer
        .end_time()
        .map_or(end_time, |loop_end| loop_end.min(end_time));

    // Every event happens on some track's step boundary, so slicing the
    // performance at exactly those boundaries timestamps everything.
    let mut boundaries: Vec<MusicalTime> = sequencer
        .tracks()
        .iter()
        .filter(|t| !t.step_duration().is_empty())
        .flat_map(|t| {
            let step = t.step_duration();
            (0usize..)
                .map(move |k| step * k)
                .take_while(|time| *time < end_time)
        })
        .collect();
    boundaries.push(end_time);
    boundaries.sort();
    boundaries.dedup();

    let micros_per_beat = sequencer.tempo().micros_per_beat();
    let mut track = vec![
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(
                u24::try_from(micros_per_beat)
                    .ok_or_else(|| anyhow!("tempo {} is too slow to export", sequencer.tempo()))?,
            )),
        },
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(time_signature_meta(&sequencer.time_signature())?),
        },
    ];

    let mut timed_events = Vec::default();
    sequencer.skip_to_start();
    sequencer.play();
    for window in boundaries.windows(2) {
        sequencer.update_time_range(&TimeRange::new_with_start_and_end(window[0], window[1]));
        sequencer.work(&mut |e| timed_events.push((window[0], e)));
    }
    sequencer.stop();
    sequencer.work(&mut |e| timed_events.push((end_time, e)));
    sequencer.skip_to_start();

    let mut last_tick = 0;
    for (time, event) in timed_events {
        let tick = time.as_ticks(TICKS_PER_BEAT as usize);
        let WorkEvent::Midi(channel, message) = event;
        track.push(TrackEvent {
            delta: delta_ticks(tick - last_tick)?,
            kind: TrackEventKind::Midi {
                channel: u4::from(channel),
                message,
            },
        });
        last_tick = tick;
    }
    track.push(TrackEvent {
        delta: delta_ticks(end_time.as_ticks(TICKS_PER_BEAT as usize) - last_tick)?,
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    let mut smf = Smf::new(Header::new(
        Format::SingleTrack,
        Timing::Metrical(u15::new(TICKS_PER_BEAT)),
    ));
    smf.tracks.push(track);
    Ok(smf)
}

/// Same as [export_to_smf()], then writes the file.
pub fn save_smf(
    sequencer: &mut EuclideanSequencer,
    cycles: usize,
    path: &Path,
) -> anyhow::Result<()> {
    let smf = export_to_smf(sequencer, cycles)?;
    smf.save(path)?;
    Ok(())
}

// The denominator is stored as a power of two, and the metronome clicks once
// per beat, counted in MIDI clocks (24 per quarter note).
fn time_signature_meta(ts: &TimeSignature) -> anyhow::Result<MetaMessage<'static>> {
    let top = u8::try_from(ts.top())
        .ok()
        .filter(|top| *top != 0)
        .ok_or_else(|| anyhow!("time signature {ts} can't be written to a MIDI file"))?;
    if !ts.bottom().is_power_of_two() {
        return Err(anyhow!("time signature {ts} can't be written to a MIDI file"));
    }
    let clocks_per_click = (96 / ts.bottom()).max(1) as u8;
    Ok(MetaMessage::TimeSignature(
        top,
        ts.bottom().trailing_zeros() as u8,
        clocks_per_click,
        8,
    ))
}

fn delta_ticks(ticks: usize) -> anyhow::Result<u28> {
    u32::try_from(ticks)
        .ok()
        .and_then(u28::try_from)
        .ok_or_else(|| anyhow!("{ticks} ticks between events is too long for a MIDI file"))
}
