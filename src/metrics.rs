// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Engagement changes counted by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementEvent {
    RetweetCreated,
    RetweetDuplicate,
    RetweetRemoved,
    QuoteCounted,
    FollowCreated,
    FollowDuplicate,
    Unfollowed,
}

impl EngagementEvent {
    pub fn label(&self) -> &'static str {
        match self {
            EngagementEvent::RetweetCreated => "retweet_created",
            EngagementEvent::RetweetDuplicate => "retweet_duplicate",
            EngagementEvent::RetweetRemoved => "retweet_removed",
            EngagementEvent::QuoteCounted => "quote_counted",
            EngagementEvent::FollowCreated => "follow_created",
            EngagementEvent::FollowDuplicate => "follow_duplicate",
            EngagementEvent::Unfollowed => "unfollowed",
        }
    }
}

/// Prometheus registry owned by the application
pub struct Metrics {
    registry: Registry,
    engagement_events: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let engagement_events = IntCounterVec::new(
            Opts::new(
                "tweaknow_engagement_events_total",
                "Retweet, quote and follow graph changes",
            ),
            &["event"],
        )
        .context("Failed to create engagement counter")?;
        registry
            .register(Box::new(engagement_events.clone()))
            .context("Failed to register engagement counter")?;

        Ok(Self {
            registry,
            engagement_events,
        })
    }

    pub fn record(&self, event: EngagementEvent) {
        self.engagement_events
            .with_label_values(&[event.label()])
            .inc();
    }

    pub fn count(&self, event: EngagementEvent) -> u64 {
        self.engagement_events
            .with_label_values(&[event.label()])
            .get()
    }

    /// Text exposition format for `/metrics`
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .context("Failed to encode metrics")?;
        String::from_utf8(buffer).context("Metrics output is not UTF-8")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_by_event_label() {
        let metrics = Metrics::new().unwrap();
        metrics.record(EngagementEvent::RetweetCreated);
        metrics.record(EngagementEvent::RetweetCreated);
        metrics.record(EngagementEvent::FollowDuplicate);

        assert_eq!(metrics.count(EngagementEvent::RetweetCreated), 2);
        assert_eq!(metrics.count(EngagementEvent::Unfollowed), 0);

        let text = metrics.render().unwrap();
        assert!(text.contains(r#"tweaknow_engagement_events_total{event="retweet_created"} 2"#));
        assert!(text.contains(r#"tweaknow_engagement_events_total{event="follow_duplicate"} 1"#));
    }
}
