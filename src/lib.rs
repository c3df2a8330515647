pub mod assemble;
pub mod auth;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod manifest;
pub mod registry;
pub mod source;

pub use error::{Error, Result};
