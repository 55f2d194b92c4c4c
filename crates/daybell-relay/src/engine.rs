//! Relay engine — one linear pass: query, filter, notify, mark.
//! Pages are handled strictly one after another in the order the source returns them.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use daybell_core::config::{AppConfig, PropertyNames};
use daybell_core::error::Result;
use daybell_core::page::Page;
use daybell_core::traits::{EventSource, Notifier};

use crate::notify::{Outcome, render_message};

/// Printed when the query finds nothing for the day.
pub const NO_EVENTS: &str = "No events for today.";

/// Result of one run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<Outcome>,
}

impl RunReport {
    pub fn notified(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::Notified { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::AlreadyNotified { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }
}

/// The relay — owns its collaborators and the settings a run needs.
pub struct Relay {
    source: Arc<dyn EventSource>,
    notifier: Arc<dyn Notifier>,
    properties: PropertyNames,
    template: String,
    delay: Duration,
    dry_run: bool,
}

impl Relay {
    pub fn new(
        config: &AppConfig,
        source: Arc<dyn EventSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            source,
            notifier,
            properties: config.properties.clone(),
            template: config.message_template.clone(),
            delay: config.delay(),
            dry_run: false,
        }
    }

    /// Query and report only; no webhook or update calls.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run once for `date`, writing one line per page to `out`.
    ///
    /// Only a failed query is returned as an error; per-page failures are
    /// recorded in the report and the loop moves on.
    pub async fn run<W: Write>(&self, date: NaiveDate, out: &mut W) -> Result<RunReport> {
        let pages = self.source.pages_on(date).await?;
        let mut report = RunReport::default();

        if pages.is_empty() {
            writeln!(out, "{NO_EVENTS}")?;
            return Ok(report);
        }

        for page in &pages {
            let outcome = self.process(page).await;
            writeln!(out, "{outcome}")?;

            if outcome.is_failure() {
                tracing::warn!("⚠️ {outcome}");
            }
            // Pause after each page that was sent and marked (Notion rate limit).
            if matches!(outcome, Outcome::Notified { .. }) && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            report.outcomes.push(outcome);
        }

        tracing::info!(
            "🔔 Run for {} done: {} notified, {} skipped, {} failed",
            date,
            report.notified(),
            report.skipped(),
            report.failed()
        );
        Ok(report)
    }

    async fn process(&self, page: &Page) -> Outcome {
        let page_id = page.id.clone();
        let title = page.title(&self.properties.title);

        if page.is_notified(&self.properties.notified) {
            return Outcome::AlreadyNotified { page_id, title };
        }

        let message = render_message(&self.template, &title);
        if self.dry_run {
            return Outcome::WouldNotify { page_id, title, message };
        }

        if let Err(e) = self.notifier.send(&message).await {
            return Outcome::NotifyFailed { page_id, title, error: e.to_string() };
        }
        tracing::debug!("📨 Sent '{}' via {}", title, self.notifier.name());

        match self.source.mark_notified(&page_id).await {
            Ok(()) => Outcome::Notified { page_id, title },
            Err(e) => Outcome::MarkFailed { page_id, title, error: e.to_string() },
        }
    }
}
