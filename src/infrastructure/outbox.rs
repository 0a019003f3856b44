use std::io::Write;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::RentalOrderPayload;
use crate::domain::ports::OrderSubmitter;

pub const AGGREGATE_TYPE: &str = "RentalOrder";
pub const EVENT_TYPE: &str = "RentalOrderCreated";

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>, DomainError> {
    m.lock()
        .map_err(|_| DomainError::Internal("outbox lock poisoned".to_string()))
}

// ── Event envelope ───────────────────────────────────────────────────────────

/// A submitted rental order, recorded for downstream consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxEvent {
    pub id: Uuid,
    pub aggregate_type: String,
    pub aggregate_id: String,
    pub event_type: String,
    pub payload: Value,
    pub created_at: DateTime<Utc>,
}

impl OutboxEvent {
    pub fn order_created(order_id: Uuid, payload: &RentalOrderPayload) -> Result<Self, DomainError> {
        let mut payload = serde_json::to_value(payload)?;
        if let Value::Object(map) = &mut payload {
            map.insert("order_id".to_string(), Value::String(order_id.to_string()));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            aggregate_type: AGGREGATE_TYPE.to_string(),
            aggregate_id: order_id.to_string(),
            event_type: EVENT_TYPE.to_string(),
            payload,
            created_at: Utc::now(),
        })
    }
}

// ── Submitters ───────────────────────────────────────────────────────────────

/// Writes one JSON line per created order to `W`.
pub struct JsonLinesOutbox<W> {
    sink: Mutex<W>,
}

impl<W: Write + Send + 'static> JsonLinesOutbox<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    pub fn into_inner(self) -> W {
        self.sink.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send + 'static> OrderSubmitter for JsonLinesOutbox<W> {
    fn create_order(&self, payload: RentalOrderPayload) -> Result<Uuid, DomainError> {
        let order_id = Uuid::new_v4();
        let event = OutboxEvent::order_created(order_id, &payload)?;
        let line = serde_json::to_string(&event)?;

        let mut sink = lock(&self.sink)?;
        writeln!(sink, "{}", line)?;
        sink.flush()?;

        log::debug!("outbox event {} written for order {}", event.id, order_id);
        Ok(order_id)
    }
}

/// Keeps created-order events in memory.
#[derive(Default)]
pub struct InMemoryOutbox {
    events: Mutex<Vec<OutboxEvent>>,
}

impl InMemoryOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Result<Vec<OutboxEvent>, DomainError> {
        Ok(lock(&self.events)?.clone())
    }
}

impl OrderSubmitter for InMemoryOutbox {
    fn create_order(&self, payload: RentalOrderPayload) -> Result<Uuid, DomainError> {
        let order_id = Uuid::new_v4();
        let event = OutboxEvent::order_created(order_id, &payload)?;
        lock(&self.events)?.push(event);
        Ok(order_id)
    }
}
