// Copyright (c) 2024 Mike Tsao

//! The `euclid` example prints Euclidean rhythms and can render a rhythm kit
//! to a MIDI file.

use clap::Parser;
use ensnare_euclid::{prelude::*, util::save_smf};
use std::path::PathBuf;
use strum::IntoEnumIterator;

#[derive(Parser, Debug, Default)]
#[clap(author, about, long_about = None)]
struct Args {
    /// Number of steps in the cycle
    #[clap(short = 'n', long, default_value_t = 16)]
    steps: usize,

    /// Number of pulses (0..=steps)
    #[clap(short = 'k', long, default_value_t = 4, allow_negative_numbers = true)]
    pulses: i64,

    /// Rotate right by this many steps (may be negative)
    #[clap(short = 'o', long, default_value_t = 0, allow_negative_numbers = true)]
    offset: i64,

    /// Use a named traditional rhythm instead of --steps/--pulses
    #[clap(short = 'p', long)]
    preset: Option<EuclideanPreset>,

    /// List the named rhythms and exit
    #[clap(short = 'l', long, value_parser)]
    list: bool,

    /// JSON rhythm kit to load instead of a single rhythm
    #[clap(short = 's', long)]
    settings: Option<PathBuf>,

    /// Render this many cycles to the given MIDI file
    #[clap(short = 'm', long)]
    midi: Option<PathBuf>,

    /// Number of cycles to render with --midi
    #[clap(short = 'c', long, default_value_t = 4)]
    cycles: usize,

    /// Print version and exit
    #[clap(short = 'v', long, value_parser)]
    version: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.version {
        println!("{}", ensnare_euclid::app_version());
        return Ok(());
    }

    if args.list {
        for preset in EuclideanPreset::iter() {
            let spec = preset.spec();
            println!(
                "{:<16}{:<10}{}",
                preset.to_string(),
                spec.to_string(),
                spec.generate()?
            );
        }
        return Ok(());
    }

    let settings = if let Some(path) = args.settings.as_ref() {
        RhythmSettings::load(path)?
    } else {
        let spec = match args.preset {
            Some(preset) => SequenceSpec {
                offset: args.offset,
                ..preset.spec()
            },
            None => SequenceSpec::new_with(args.steps, args.pulses, args.offset),
        };
        let mut settings = RhythmSettings::default();
        settings.add_track(TrackSettings {
            spec,
            ..Default::default()
        });
        settings
    };

    let mut sequencer = settings.to_sequencer()?;
    for track in sequencer.tracks() {
        println!("{:<10}{}", track.spec().to_string(), track.sequence());
    }

    if let Some(path) = args.midi {
        save_smf(&mut sequencer, args.cycles, &path)?;
        eprintln!("wrote {} cycles to {}", args.cycles, path.display());
    }
    Ok(())
}
