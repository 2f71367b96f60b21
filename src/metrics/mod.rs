use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry};

// ============================================================================
// Metrics Module - Prometheus metrics for the portal's domain flows
// ============================================================================
//
// Covers:
// - Order submissions (placed, rejected by validation, declined at payment)
// - Estimated order value distribution
// - Tracking lookups by outcome
//
// Nothing is exported over HTTP; callers gather from `registry()`.
// ============================================================================

pub struct Metrics {
    registry: Registry,

    // Order Metrics
    pub orders_submitted: IntCounter,
    pub orders_rejected: IntCounterVec,
    pub order_value: Histogram,

    // Payment Metrics
    pub payments_declined: IntCounterVec,

    // Tracking Metrics
    pub tracking_lookups: IntCounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_submitted = IntCounter::new(
            "orders_submitted_total",
            "Total orders placed successfully",
        )?;
        registry.register(Box::new(orders_submitted.clone()))?;

        let orders_rejected = IntCounterVec::new(
            Opts::new("orders_rejected_total", "Order drafts rejected by validation"),
            &["reason"],
        )?;
        registry.register(Box::new(orders_rejected.clone()))?;

        let order_value = Histogram::with_opts(
            HistogramOpts::new("order_value", "Estimated value of placed orders")
                .buckets(vec![150.0, 200.0, 300.0, 500.0, 1000.0, 2500.0, 5000.0]),
        )?;
        registry.register(Box::new(order_value.clone()))?;

        let payments_declined = IntCounterVec::new(
            Opts::new("payments_declined_total", "Payment confirmations declined"),
            &["kind"],
        )?;
        registry.register(Box::new(payments_declined.clone()))?;

        let tracking_lookups = IntCounterVec::new(
            Opts::new("tracking_lookups_total", "Tracking lookups by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(tracking_lookups.clone()))?;

        Ok(Self {
            registry,
            orders_submitted,
            orders_rejected,
            order_value,
            payments_declined,
            tracking_lookups,
        })
    }

    /// Get the Prometheus registry for gathering metrics
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_order_placed(&self, value: f64) {
        self.orders_submitted.inc();
        self.order_value.observe(value);
    }

    pub fn record_order_rejected(&self, reason: &str) {
        self.orders_rejected.with_label_values(&[reason]).inc();
    }

    /// `kind` is "order" or "invoice"
    pub fn record_payment_declined(&self, kind: &str) {
        self.payments_declined.with_label_values(&[kind]).inc();
    }

    pub fn record_tracking_lookup(&self, outcome: &str) {
        self.tracking_lookups.with_label_values(&[outcome]).inc();
    }
}
