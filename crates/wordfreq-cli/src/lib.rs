pub mod commands;
pub mod error;
pub mod interactive;
pub mod source;
pub mod trace_init;

pub use error::{CommandError, InputError};
