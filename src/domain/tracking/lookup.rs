use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::metrics::Metrics;
use super::errors::TrackingError;
use super::record::{sample_tracking_record, TrackingRecord};

// ============================================================================
// Tracking Lookup
// ============================================================================

#[async_trait]
pub trait TrackingSource: Send + Sync {
    async fn lookup(&self, tracking_number: &str) -> Result<TrackingRecord, TrackingError>;
}

/// In-memory source with simulated backend latency.
pub struct SampleTrackingSource {
    records: Vec<TrackingRecord>,
    latency: Duration,
    failure: Option<TrackingError>,
    metrics: Option<Arc<Metrics>>,
}

impl SampleTrackingSource {
    pub fn new(latency: Duration) -> Self {
        Self {
            records: vec![sample_tracking_record()],
            latency,
            failure: None,
            metrics: None,
        }
    }

    pub fn with_records(mut self, records: Vec<TrackingRecord>) -> Self {
        self.records = records;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Every non-blank lookup fails with `error` after the usual delay.
    pub fn fail_with(mut self, error: TrackingError) -> Self {
        self.failure = Some(error);
        self
    }

    fn find(&self, tracking_number: &str) -> Result<TrackingRecord, TrackingError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        self.records
            .iter()
            .find(|record| record.order_id.as_str() == tracking_number)
            .cloned()
            .ok_or_else(|| TrackingError::NotFound(tracking_number.to_string()))
    }

    fn record_outcome(&self, outcome: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.record_tracking_lookup(outcome);
        }
    }
}

impl Default for SampleTrackingSource {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}

#[async_trait]
impl TrackingSource for SampleTrackingSource {
    async fn lookup(&self, tracking_number: &str) -> Result<TrackingRecord, TrackingError> {
        let tracking_number = tracking_number.trim();
        if tracking_number.is_empty() {
            self.record_outcome(TrackingError::EmptyTrackingNumber.outcome());
            return Err(TrackingError::EmptyTrackingNumber);
        }

        tracing::debug!(tracking_number, latency_ms = self.latency.as_millis() as u64, "Looking up shipment");
        tokio::time::sleep(self.latency).await;

        match self.find(tracking_number) {
            Ok(record) => {
                tracing::info!(
                    order_id = %record.order_id,
                    status = %record.status,
                    "📦 Shipment found"
                );
                self.record_outcome("found");
                Ok(record)
            }
            Err(error) => {
                tracing::warn!(tracking_number, error = %error, "Tracking lookup failed");
                self.record_outcome(error.outcome());
                Err(error)
            }
        }
    }
}
