// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verification layer: type-level invariants and runtime contracts.
//!
//! Two complementary approaches to catching bugs in the matcher:
//!
//! 1. **Type-level wrappers** (`Excerpt`) that can only be built by proving the
//!    chunk really sits at the claimed place in the document. A `Verdict` that
//!    says "valid" carries one, so an accepted chunk always has evidence.
//!
//! 2. **Runtime contracts** that panic in debug builds when the KMP table or a
//!    reported match is wrong. Zero-cost in release, but catch bugs when tests run.

mod types;
pub mod contracts;

pub use types::*;
