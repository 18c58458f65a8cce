//! Process-wide configuration.
//!
//! Values are layered defaults, then the TOML config file, then command line
//! arguments and their environment variables. Every key is a plain string in
//! a shared map; typed accessors parse on the way out.

mod config;

pub use config::*;
