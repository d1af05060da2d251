//! Giorgos - an animated desktop companion.
//!
//! A borderless, always-on-top window shows a character that idles, walks
//! toward the pointer, gestures when clicked, and periodically delivers
//! multi-part quotes.

pub mod app;
pub mod assets;
pub mod behavior;
pub mod cli;
pub mod config;
pub mod quotes;
pub mod timers;
pub mod window;

pub use cli::Cli;
pub use config::Tuning;
