use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use parcel_portal::config::PortalConfig;
use parcel_portal::domain::account::{PasswordReset, SimulatedResetService};
use parcel_portal::domain::invoice::{pay_invoice, sample_invoices, BillingSummary};
use parcel_portal::domain::order::{
    sample_orders, ItemForm, OrderBook, OrderCommand, OrderDraft, OrderRecordBuilder, Priority,
    SubmissionOutcome,
};
use parcel_portal::domain::payment::LoggingConfirmation;
use parcel_portal::domain::tracking::{SampleTrackingSource, TrackingSource};
use parcel_portal::metrics::Metrics;
use parcel_portal::view::{recent_orders, StatusFilter, TableQuery};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO, debug for this crate; override with RUST_LOG
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,parcel_portal=debug"))
        )
        .init();

    tracing::info!("🚀 Starting parcel portal demo");

    let config = PortalConfig::from_env()?;
    let metrics = Arc::new(Metrics::new()?);
    let approve = LoggingConfirmation { approve: true };

    // === 1. Dashboard with the seeded orders ===
    let mut book = OrderBook::new(
        config.pricing.clone(),
        config.validation_rules(),
        OrderRecordBuilder::default(),
    )
    .with_metrics(metrics.clone())
    .with_orders(sample_orders())?;

    for row in recent_orders(book.orders(), 3) {
        tracing::info!(
            id = %row.id,
            customer = %row.customer,
            status = %row.status,
            value = %row.value,
            date = %row.date,
            "Recent order"
        );
    }

    // === 2. Fill in the creation form and submit ===
    let mut draft = OrderDraft {
        customer_name: "John Doe".into(),
        customer_phone: "+94 77 123 4567".into(),
        customer_email: "john@example.com".into(),
        pickup_address: "123 Main Street, Colombo 03".into(),
        delivery_address: "456 Galle Road, Mount Lavinia".into(),
        beneficiary_name: "Jane Perera".into(),
        delivery_phone: "+94 71 987 6543".into(),
        priority: Priority::Express,
        ..OrderDraft::default()
    };
    draft.add_item(
        ItemForm {
            name: "Electronics Package".into(),
            quantity: "1".into(),
            weight: "2.5".into(),
            dimensions: "30x20x10 cm".into(),
        }
        .into_item(),
    )?;
    draft.add_item(
        ItemForm {
            name: "Documents".into(),
            quantity: "2".into(),
            weight: "0.2".into(),
            ..ItemForm::default()
        }
        .into_item(),
    )?;

    for line in book.quote(&draft).line_items() {
        tracing::info!(description = %line.description, amount = line.amount, "Quote line");
    }

    let order_id = match book.submit(&mut draft, &approve)? {
        SubmissionOutcome::Placed(order) => order.id().clone(),
        SubmissionOutcome::Declined { quote } => {
            tracing::warn!(total = quote.total, "Demo order was declined");
            return Ok(());
        }
    };

    // === 3. Lifecycle ===
    book.handle(&order_id, OrderCommand::Dispatch)?;
    book.handle(
        &order_id,
        OrderCommand::ReportDelay { reason: Some("Road closure on Galle Road".into()) },
    )?;
    book.handle(&order_id, OrderCommand::Dispatch)?;
    let delivered = book.handle(&order_id, OrderCommand::Deliver)?.clone();

    let replayed = book.replay(&order_id)?;
    tracing::info!(
        order_id = %order_id,
        events = book.history(&order_id).len(),
        replay_matches = (replayed == delivered),
        "Order history replayed"
    );

    // === 4. Orders table ===
    let mut query = TableQuery::new();
    query.set_filter(StatusFilter::Only(delivered.status));
    let page = query.apply(book.orders(), &config.orders_paginator());
    tracing::info!(page = page.page, total_pages = page.total_pages, "{}", page.showing("orders"));

    // === 5. Billing ===
    let invoices = sample_invoices();
    let summary = BillingSummary::from_invoices(&invoices);
    tracing::info!(
        total = summary.total,
        paid = summary.paid,
        pending = summary.pending,
        overdue = summary.overdue,
        "Billing summary"
    );
    for invoice in invoices.iter().filter(|invoice| invoice.status.is_payable()) {
        let outcome = pay_invoice(invoice, &approve, Some(&metrics))?;
        tracing::info!(invoice_id = %invoice.id, ?outcome, "Invoice payment");
    }

    // === 6. Tracking lookup ===
    let tracking =
        SampleTrackingSource::new(config.tracking_latency()).with_metrics(metrics.clone());
    match tracking.lookup("ORD-1735529825123").await {
        Ok(record) => {
            if let Some(next) = record.next_pending() {
                tracing::info!(
                    progress = record.progress(),
                    next = %next.status,
                    location = %record.current_location,
                    "Shipment progress"
                );
            }
        }
        Err(e) => tracing::warn!(error = %e, "Tracking lookup failed"),
    }

    // === 7. Password reset ===
    let mut reset = PasswordReset::new(SimulatedResetService::new(
        config.reset_email_latency(),
        config.reset_latency(),
    ));
    reset.submit_email("john@example.com").await?;
    reset.submit_new_password("hunter22", "hunter22").await?;

    tracing::info!(
        "📊 Metrics registry holds {} metric families",
        metrics.registry().gather().len()
    );
    tracing::info!("✅ Demo finished");
    Ok(())
}
