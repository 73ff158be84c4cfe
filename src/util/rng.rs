// Copyright (c) 2024 Mike Tsao

//! Provides a random-number generator for picking rhythms and for testing.

use byteorder::{BigEndian, ByteOrder};
use core::ops::RangeInclusive;
use delegate::delegate;

/// A pseudorandom number generator (PRNG). Rhythm generation is
/// deterministic; this is only for choosing what to generate, so it doesn't
/// need to be cryptographically secure.
#[derive(Debug)]
pub struct Rng(oorandom::Rand64);
impl Default for Rng {
    fn default() -> Self {
        // A failure here means the OS can't produce entropy, which nobody
        // can recover from.
        Self::new_with_seed(Self::generate_seed().unwrap())
    }
}
#[allow(missing_docs)]
impl Rng {
    /// Pass the same number to [Rng::new_with_seed()] to get the same stream
    /// back again. Good for reproducing test failures.
    pub fn new_with_seed(seed: u128) -> Self {
        Self(oorandom::Rand64::new(seed))
    }

    /// Creates a seed from the operating system's entropy source.
    pub fn generate_seed() -> anyhow::Result<u128> {
        let mut bytes = [0u8; 16];

        getrandom::getrandom(&mut bytes)?;
        Ok(BigEndian::read_u128(&bytes))
    }

    delegate! {
        to self.0 {
            pub fn rand_u64(&mut self) -> u64;
            pub fn rand_i64(&mut self) -> i64;
            pub fn rand_range(&mut self, range: core::ops::Range<u64>) -> u64;
        }
    }

    /// A value in `range`, both ends included. An empty range yields its
    /// start.
    pub fn rand_usize_inclusive(&mut self, range: RangeInclusive<usize>) -> usize {
        let (start, end) = range.into_inner();
        if end <= start {
            return start;
        }
        start + self.rand_range(0..(end - start) as u64 + 1) as usize
    }

    /// A rotation for a cycle of `steps` steps. It can be negative or wrap
    /// around the cycle a few times, which exercises offset normalization.
    pub fn rand_offset(&mut self, steps: usize) -> i64 {
        if steps == 0 {
            0
        } else {
            self.rand_i64() % (steps as i64 * 4)
        }
    }
}
