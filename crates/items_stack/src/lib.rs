//! items_stack - CLI front end for the items REST API stack.

pub mod cli;
pub mod error;
pub mod output;

pub use error::{Result, StackError};
