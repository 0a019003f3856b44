use std::sync::Arc;

use uuid::Uuid;

use super::errors::DomainError;
use super::order::RentalOrderPayload;

/// Receives a finalized draft and creates the order, returning its id.
pub trait OrderSubmitter: Send + Sync + 'static {
    fn create_order(&self, payload: RentalOrderPayload) -> Result<Uuid, DomainError>;
}

impl<T: OrderSubmitter + ?Sized> OrderSubmitter for Arc<T> {
    fn create_order(&self, payload: RentalOrderPayload) -> Result<Uuid, DomainError> {
        (**self).create_order(payload)
    }
}
