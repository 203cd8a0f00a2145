//! Core operations.
//!
//! This module contains the business logic for shapegen commands,
//! separated from CLI argument parsing and output rendering.

pub mod compile;

pub use compile::{compile, load};
