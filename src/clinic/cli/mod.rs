//! # CLI Layer
//!
//! This module is **one possible UI client** for the clinic library. It is
//! the only place that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `setup`: clap definitions
//! - `commands`: `run()` and the per-command `handle_*()` functions
//! - `menu`: the interactive numbered menu
//! - `prompt`: line prompts over any `BufRead`/`Write` pair
//! - `render`: string builders for cards, tables, stats and messages
//! - `styles`: terminal styles

pub mod commands;
pub mod menu;
pub mod prompt;
pub mod render;
pub mod setup;
pub mod styles;

pub use commands::run;
