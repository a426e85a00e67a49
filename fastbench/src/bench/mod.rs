// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The benchmark harness.
//!
//! A benchmark entry first builds a fixture with all inputs the measured operation needs, then hands
//! control to the runner which resets the [timer::Bencher] and executes the operation exactly as many
//! times as the bencher asks for. Inputs are never rebuilt inside the timed region.

pub mod catalog;
pub mod driver;
pub mod fixture;
pub mod runner;
pub mod timer;

/// The message every benchmark signs or hashes.
pub const MESSAGE: &[u8] = b"IOTA";
