pub mod action;
pub mod config;
pub mod error;
pub mod interactive;
pub mod lang;
pub mod storage;
pub mod style;
pub mod testing;

pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::lang::Language;
