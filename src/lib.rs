// Copyright (c) 2024 Mike Tsao

#![deny(missing_docs, unused_imports, unused_variables)]
#![allow(rustdoc::private_intra_doc_links)]

//! Euclidean rhythms, generated with Bjorklund's algorithm and played back as
//! MIDI.
//!
//! * *Just the pattern*: call [generate()] with a step count, a pulse count,
//! and a rotation, and read the resulting [Sequence](types::Sequence).
//! * *One looping voice*: wrap a [SequenceSpec](types::SequenceSpec) in an
//! [EuclideanTrack], drive it with [Controls](traits::Controls), and collect
//! the MIDI events it produces.
//! * *A whole kit*: describe several tracks in
//! [RhythmSettings](util::RhythmSettings), turn them into an
//! [EuclideanSequencer], and play it live or render it with
//! [export_to_smf()](util::export_to_smf).

/// A collection of imports that are useful to users of this crate. `use
/// ensnare_euclid::prelude::*;` for easier onboarding.
pub mod prelude {
    pub use super::{
        error::Error, rhythm::prelude::*, traits::prelude::*, types::prelude::*,
        util::prelude::*,
    };
}

// Fundamental structures that are important enough to re-export at top level.
pub use {
    error::{Error, Result},
    rhythm::{generate, EuclideanSequencer, EuclideanTrack},
    version::app_version,
};

pub mod error;
pub mod rhythm;
pub mod traits;
pub mod types;
pub mod util;

mod version;
