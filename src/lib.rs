//! # dimweight
//!
//! Turns box dimensions and a quantity into a shipping volume (CBM) and a
//! dimensional weight, using a carrier divisor.
//!
//! The crate is split into a pure core and thin adapters:
//!
//! - [`calc`] - parsing, validation and computation
//! - [`divisor`] - divisor presets and resolution
//! - [`format`] - display formatting
//! - [`form`] - the [`FormState`] controller (calculate, reset, example)
//! - [`output`] - JSON and human-readable rendering
//! - [`interactive`] - the terminal menu session
//! - [`config`] - persistent defaults from `config.toml`

pub mod calc;
pub mod config;
pub mod divisor;
pub mod form;
pub mod format;
pub mod interactive;
pub mod output;

pub use calc::{CalcError, Estimate, Inputs, estimate};
pub use config::OutputOptions;
pub use divisor::DivisorPreset;
pub use form::{Field, FormState};
