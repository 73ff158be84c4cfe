// Copyright (c) 2024 Mike Tsao

use crate::{error::Error, rhythm, util::Rng};
use core::fmt::{self, Display};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// The parameters of a Euclidean rhythm: how many steps in a cycle, how many
/// of them are pulses, and how far to rotate the result.
///
/// [SequenceSpec] doesn't validate itself on construction. A spec that's out
/// of range is still a perfectly good value to serialize or display; it just
/// can't be generated. See [SequenceSpec::validate()].
#[derive(Clone, Copy, Debug, Default, Builder, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SequenceSpec {
    /// The total number of slots in one cycle.
    pub steps: usize,

    /// How many of the slots are pulses. Signed so that a bad value can be
    /// represented and rejected.
    pub pulses: i64,

    /// Rotation to the right. Any value is fine; it's reduced modulo `steps`.
    #[builder(default)]
    #[serde(default)]
    pub offset: i64,
}
impl SequenceSpec {
    #[allow(missing_docs)]
    pub const fn new_with(steps: usize, pulses: i64, offset: i64) -> Self {
        Self {
            steps,
            pulses,
            offset,
        }
    }

    /// Returns [Error::InvalidArgument] if `pulses` is outside `0..=steps`.
    pub fn validate(&self) -> Result<(), Error> {
        if self.pulses < 0 || self.pulses as u64 > self.steps as u64 {
            Err(Error::InvalidArgument {
                steps: self.steps,
                pulses: self.pulses,
            })
        } else {
            Ok(())
        }
    }

    /// Generates the [Sequence] described by this spec.
    pub fn generate(&self) -> Result<Sequence, Error> {
        rhythm::generate(self.steps, self.pulses, self.offset)
    }

    /// The offset reduced into `0..steps`, or zero if there are no steps.
    pub fn normalized_offset(&self) -> usize {
        if self.steps == 0 {
            0
        } else {
            self.offset.rem_euclid(self.steps as i64) as usize
        }
    }
}
impl Display for SequenceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E({},{})", self.pulses, self.steps)?;
        if self.offset != 0 {
            write!(f, "{:+}", self.offset)?;
        }
        Ok(())
    }
}

impl SequenceSpecBuilder {
    /// Picks a random valid spec with at most `max_steps` steps. For
    /// debugging.
    pub fn random(&mut self, rng: &mut Rng, max_steps: usize) -> &mut Self {
        let steps = rng.rand_usize_inclusive(1..=max_steps.max(1));
        let pulses = rng.rand_usize_inclusive(0..=steps) as i64;
        let offset = rng.rand_offset(steps);
        self.steps(steps).pulses(pulses).offset(offset)
    }
}

/// An ordered cycle of on/off slots. A `true` slot is a pulse.
///
/// A [Sequence] is a plain value. Whoever asked for it owns it, and nothing
/// else changes it afterward; replace it wholesale to change the rhythm.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sequence(Vec<bool>);
#[allow(missing_docs)]
impl Sequence {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the slot at `index` is a pulse. Out-of-range indexes aren't
    /// pulses.
    pub fn is_pulse(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or_default()
    }

    /// Treats the sequence as a loop and answers for the given beat, which
    /// may be past the end of the first cycle.
    pub fn is_pulse_at_beat(&self, beat: usize) -> bool {
        if self.0.is_empty() {
            false
        } else {
            self.0[beat % self.0.len()]
        }
    }

    pub fn pulse_count(&self) -> usize {
        self.0.iter().filter(|slot| **slot).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &bool> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    /// Returns a copy in which the slot at index `i` has moved to
    /// `(i + amount) % len`.
    pub fn rotated_right(&self, amount: usize) -> Self {
        let mut slots = self.0.clone();
        let len = slots.len();
        if len != 0 {
            slots.rotate_right(amount % len);
        }
        Self(slots)
    }
}
impl From<Vec<bool>> for Sequence {
    fn from(value: Vec<bool>) -> Self {
        Self(value)
    }
}
impl From<Sequence> for Vec<bool> {
    fn from(value: Sequence) -> Self {
        value.0
    }
}
impl Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in self.0.iter() {
            f.write_str(if *slot { "x" } else { "." })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_validation() {
        assert!(SequenceSpec::new_with(4, 0, 0).validate().is_ok());
        assert!(SequenceSpec::new_with(4, 4, 0).validate().is_ok());
        assert!(SequenceSpec::new_with(0, 0, 0).validate().is_ok());
        assert_eq!(
            SequenceSpec::new_with(4, 5, 0).validate(),
            Err(Error::InvalidArgument {
                steps: 4,
                pulses: 5
            })
        );
        assert!(SequenceSpec::new_with(4, -1, 0).validate().is_err());
    }

    #[test]
    fn spec_builder_defaults_offset() {
        let spec = SequenceSpecBuilder::default()
            .steps(8)
            .pulses(3)
            .build()
            .unwrap();
        assert_eq!(spec, SequenceSpec::new_with(8, 3, 0));
        assert!(
            SequenceSpecBuilder::default().pulses(3).build().is_err(),
            "steps has no default"
        );
    }

    #[test]
    fn spec_display_signs_offset() {
        assert_eq!(SequenceSpec::new_with(8, 3, 0).to_string(), "E(3,8)");
        assert_eq!(SequenceSpec::new_with(8, 3, 2).to_string(), "E(3,8)+2");
        assert_eq!(SequenceSpec::new_with(8, 3, -1).to_string(), "E(3,8)-1");
    }

    #[test]
    fn spec_offset_normalization() {
        assert_eq!(SequenceSpec::new_with(8, 3, -1).normalized_offset(), 7);
        assert_eq!(SequenceSpec::new_with(8, 3, 17).normalized_offset(), 1);
        assert_eq!(SequenceSpec::new_with(0, 0, -5).normalized_offset(), 0);
    }

    #[test]
    fn random_specs_are_valid() {
        let mut rng = Rng::new_with_seed(1234);
        for _ in 0..100 {
            let spec = SequenceSpecBuilder::default()
                .random(&mut rng, 32)
                .build()
                .unwrap();
            assert!(spec.steps >= 1 && spec.steps <= 32);
            assert!(spec.validate().is_ok(), "{spec} should be valid");
        }
    }

    #[test]
    fn spec_serializes_kebab_case() {
        let spec = SequenceSpec::new_with(16, 5, 2);
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{"steps":16,"pulses":5,"offset":2}"#);
        let spec: SequenceSpec = serde_json::from_str(r#"{"steps":8,"pulses":3}"#).unwrap();
        assert_eq!(spec.offset, 0, "offset should be optional");
    }

    #[test]
    fn sequence_accessors() {
        let s = Sequence::from(vec![true, false, false, true, false]);
        assert_eq!(s.len(), 5);
        assert_eq!(s.pulse_count(), 2);
        assert!(s.is_pulse(3));
        assert!(!s.is_pulse(99));
        assert!(s.is_pulse_at_beat(8));
        assert!(!s.is_pulse_at_beat(9));
        assert_eq!(s.to_string(), "x..x.");
        assert_eq!(s.rotated_right(1).to_string(), ".x..x");
        assert_eq!(s.rotated_right(6), s.rotated_right(1));

        let empty = Sequence::default();
        assert!(!empty.is_pulse_at_beat(3));
        assert!(empty.rotated_right(3).is_empty());
    }
}
