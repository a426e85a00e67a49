// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

/// This module contains an entropy source which always yields the same byte. The purpose is to make
/// key generation benchmarks reproducible and comparable across runs: every run draws the same
/// secret bytes and therefore exercises the same code path.
///
/// Warning: All sources in this module are completely unsafe to use in production.
pub mod rng;
