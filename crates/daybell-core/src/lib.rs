//! # Daybell Core
//!
//! Shared building blocks for the Daybell relay: configuration, the error type,
//! the Notion page model with its property accessors, and the traits the
//! relay pipeline talks to.

pub mod config;
pub mod error;
pub mod page;
pub mod traits;

pub use config::{AppConfig, PropertyNames};
pub use error::{DaybellError, Result};
pub use page::{Page, UNTITLED};
pub use traits::{EventSource, Notifier};
