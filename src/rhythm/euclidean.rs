// Copyright (c) 2024 Mike Tsao

//! Bjorklund's algorithm for Euclidean rhythms.
//!
//! A Euclidean rhythm E(k, n) spreads k pulses as evenly as possible across n
//! steps. Bjorklund found the construction while timing neutron-source gates;
//! Toussaint later noticed that the results are many of the world's
//! traditional rhythms. The construction runs Euclid's GCD algorithm on
//! (k, n - k), remembers the quotients and remainders, and then unwinds them
//! into a pattern.

use crate::{
    error::Error,
    types::{Sequence, SequenceSpec},
};

/// Generates E(`pulses`, `steps`) rotated right by `offset`.
///
/// The unrotated pattern always starts on a pulse, so `generate(8, 3, 0)` is
/// the tresillo `x..x..x.`. A nonzero `offset` then moves the slot at index
/// `i` to `(i + offset) mod steps`; negative offsets rotate left.
///
/// Returns [Error::InvalidArgument] if `pulses` is outside `0..=steps`. Zero
/// steps is not an error; it produces an empty [Sequence].
pub fn generate(steps: usize, pulses: i64, offset: i64) -> Result<Sequence, Error> {
    let spec = SequenceSpec::new_with(steps, pulses, offset);
    spec.validate()?;

    // validate() proved 0 <= pulses <= steps.
    let pulses = pulses as usize;
    let slots = if pulses == 0 {
        vec![false; steps]
    } else if pulses >= steps {
        vec![true; steps]
    } else {
        bjorklund(steps, pulses)
    };
    Ok(Sequence::from(slots).rotated_right(spec.normalized_offset()))
}

/// Same as [generate()], taking its arguments from a [SequenceSpec].
pub fn generate_spec(spec: &SequenceSpec) -> Result<Sequence, Error> {
    generate(spec.steps, spec.pulses, spec.offset)
}

/// The quotients and remainders of Euclid's algorithm on (pulses, steps -
/// pulses). Lives only for the duration of one generation.
struct Construction {
    counts: Vec<usize>,
    remainders: Vec<usize>,
}
impl Construction {
    fn new(steps: usize, pulses: usize) -> Self {
        assert!(
            pulses > 0 && pulses < steps,
            "Bjorklund construction needs 0 < pulses ({pulses}) < steps ({steps})"
        );
        let mut divisor = steps - pulses;
        let mut counts = Vec::default();
        let mut remainders = vec![pulses];
        let mut level = 0;
        loop {
            // remainders[level] > 0: it starts as pulses, and the loop exits
            // before any later remainder of 0 or 1 is used as a divisor.
            counts.push(divisor / remainders[level]);
            remainders.push(divisor % remainders[level]);
            divisor = remainders[level];
            level += 1;
            if remainders[level] <= 1 {
                break;
            }
        }
        counts.push(divisor);
        Self { counts, remainders }
    }

    /// The level at which expansion begins.
    fn top(&self) -> isize {
        self.counts.len() as isize - 1
    }

    fn build(&self, level: isize, slots: &mut Vec<bool>) {
        match level {
            -1 => slots.push(false),
            -2 => slots.push(true),
            _ => {
                let index = level as usize;
                for _ in 0..self.counts[index] {
                    self.build(level - 1, slots);
                }
                if self.remainders[index] != 0 {
                    self.build(level - 2, slots);
                }
            }
        }
    }
}

fn bjorklund(steps: usize, pulses: usize) -> Vec<bool> {
    let construction = Construction::new(steps, pulses);
    let mut slots = Vec::with_capacity(steps);
    construction.build(construction.top(), &mut slots);
    debug_assert_eq!(slots.len(), steps);

    // The expansion comes out back to front.
    slots.reverse();

    // Start on a pulse.
    if let Some(first_pulse) = slots.iter().position(|slot| *slot) {
        slots.rotate_left(first_pulse);
    }
    slots
}
