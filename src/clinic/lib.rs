//! # Clinic Architecture
//!
//! `clinic` is a **patient registry library** with a console client on top.
//! The roster logic knows nothing about terminals; the binary is one way of
//! driving it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, runs the interactive menu, prompts     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Parses operator-typed ids and search criteria            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Calls the registry, wraps outcomes in CmdResult          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Registry (registry.rs)                                     │
//! │  - Owns the roster, assigns ids, search, stats, mutations   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - PatientStore trait, whole-roster snapshots               │
//! │  - JsonFileStore (production), InMemoryStore (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust values and returns `Result`s. It
//! never prints and never exits; diagnostics go through `tracing`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Per-operation glue producing `CmdResult`
//! - [`registry`]: The roster and its operations
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: `Patient`, drafts, partial updates
//! - [`stats`]: Gender and per-doctor statistics
//! - [`config`]: Configuration file
//! - [`init`]: Data directory resolution and wiring
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod registry;
pub mod stats;
pub mod store;
