//! Shared types for the swap quoter workspace.
//!
//! Orders, fill plans, quote results and the error taxonomy live here so
//! that the pruning, pricing and calculation crates agree on one model.

pub mod common;
pub mod errors;
pub mod fill;
pub mod math;
pub mod order;
pub mod quote;
pub mod validation;

pub use common::*;
pub use errors::*;
pub use fill::*;
pub use order::*;
pub use quote::*;
pub use validation::*;
