// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verification layer: invariant checks and runtime contracts.
//!
//! Two complementary approaches to catching bugs:
//!
//! 1. **Fallible checks** (`check_permutation`, `check_non_increasing`, ...)
//!    that return an [`InvariantError`] saying where the output went wrong.
//!    Tests and the fuzz target call these directly.
//!
//! 2. **Runtime contracts** that panic in debug builds when an invariant is
//!    violated. Zero-cost in release, but catch bugs whenever tests run.
//!
//! The contracts are thin wrappers over the checks, so both agree on what
//! "correct" means.

mod types;
pub mod contracts;

pub use types::*;
