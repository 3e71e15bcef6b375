//! cp-live library crate.
//!
//! Live-status polling and state-transition engine: settings partitions,
//! the service state machine, the YouTube poller and the scheduler that
//! drives them.

pub mod audit;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod notification;
pub mod registry;
pub mod scheduler;
pub mod service;
pub mod services;
pub mod settings;
pub mod utils;

pub use error::{Error, Result};
