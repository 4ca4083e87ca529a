//! CLOAK Protocol - Core types, constants, and traits.
//!
//! This module provides the configuration object, the error taxonomy, the
//! wire-format constants, and the transform trait the external pipeline
//! depends on.

mod config;
mod constants;
mod error;
mod traits;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use traits::*;
