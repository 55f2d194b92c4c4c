//! # Daybell Relay
//!
//! Announces today's Notion pages on Discord and marks them so the next run
//! does not repeat them.
//!
//! ## Architecture
//! ```text
//! Relay::run(date)
//!   ├── EventSource::pages_on(date)      → Notion database query
//!   └── for each page, in order
//!         ├── notified?  → "Already notified: …"
//!         ├── Notifier::send(message)    → Discord webhook
//!         ├── EventSource::mark_notified → Notion page update
//!         └── pause (rate limit)
//! ```

pub mod dispatch;
pub mod engine;
pub mod notify;

pub use dispatch::DiscordWebhook;
pub use engine::{NO_EVENTS, Relay, RunReport};
pub use notify::{Outcome, render_message};
