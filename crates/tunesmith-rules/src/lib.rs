// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parameter rules for the Tunesmith optimizer.
//!
//! This crate provides:
//! - [`tables::rule_for`]: the static per-use-case `{min, max, default}`
//!   rule table for temperature, nucleus_p, and max_tokens
//! - [`ParameterRuleEngine`]: context adjustment and historical blending on
//!   top of the table, always clamped into the category's declared range
//!
//! The engine is pure and lock-free; it consumes the classifier's output
//! type but never the classifier itself.

pub mod engine;
pub mod tables;

pub use engine::{ParameterRuleEngine, HISTORICAL_BLEND_WEIGHT};
pub use tables::{rule_for, ParamRange, TokenRange, UseCaseRule};
