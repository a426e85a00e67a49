// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use rand::{CryptoRng, RngCore};

/// An RNG which fills every buffer with a single constant byte.
///
/// It is marked [CryptoRng] only so that it can be handed to key generation in benchmarks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstantRng {
    byte: u8,
}

impl ConstantRng {
    pub const fn new(byte: u8) -> Self {
        Self { byte }
    }

    /// The all-zero source.
    pub const fn zero() -> Self {
        Self::new(0)
    }

    pub fn byte(&self) -> u8 {
        self.byte
    }
}

impl RngCore for ConstantRng {
    fn next_u32(&mut self) -> u32 {
        u32::from_le_bytes([self.byte; 4])
    }

    fn next_u64(&mut self) -> u64 {
        u64::from_le_bytes([self.byte; 8])
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(self.byte);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for ConstantRng {}
