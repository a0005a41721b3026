// Copyright 2019-2025 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Wire types shared by both schema generations.

pub mod crypto;
pub mod econ;
