// Allow some clippy lints project-wide for code style consistency
#![allow(clippy::uninlined_format_args)]

pub mod cli;
pub mod config;
pub mod error;

pub use config::{Configurable, Env, LoadOptions, Walker, load};
