use anyhow::Result;
use super::event::EventEnvelope;

// ============================================================================
// Aggregate
// ============================================================================
//
// `handle_command` decides, `apply_event` records. Decisions never mutate
// state, so a rejected command leaves the aggregate as it was, and replaying
// the log rebuilds exactly what the live aggregate holds.
//
// ============================================================================

/// Something whose state is a fold over its own events.
pub trait Aggregate: Sized {
    type Event;
    type Command;
    type Error;

    /// The creation event; anything else is an error.
    fn apply_first_event(event: &Self::Event) -> Result<Self, Self::Error>;

    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error>;

    /// Business rules live here. An empty vec means "nothing to record".
    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;

    /// Key under which the aggregate's events are recorded
    fn aggregate_id(&self) -> &str;

    /// Number of events applied so far
    fn version(&self) -> u64;

    /// Fold a recorded stream back into an aggregate.
    fn load_from_events(events: &[EventEnvelope<Self::Event>]) -> Result<Self>
    where
        Self::Error: std::fmt::Display,
    {
        let Some((first, rest)) = events.split_first() else {
            anyhow::bail!("No events to load");
        };

        let mut aggregate = Self::apply_first_event(&first.event_data)
            .map_err(|e| anyhow::anyhow!("Failed to apply first event: {}", e))?;

        for envelope in rest {
            aggregate.apply_event(&envelope.event_data)
                .map_err(|e| anyhow::anyhow!("Failed to apply event: {}", e))?;
        }

        Ok(aggregate)
    }
}
