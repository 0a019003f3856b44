use std::fmt;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::DomainError;
use super::input::{coerce_amount, coerce_count, InputValue};
use super::line_item::LineItem;
use super::order::RentalOrderPayload;
use super::ports::OrderSubmitter;
use super::totals::{compute_totals, OrderTotals};
use super::user::User;

/// Top-level free-text fields of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Customer,
    InvoiceAddress,
    DeliveryAddress,
    RentalTemplate,
    ExpirationDate,
    OrderDate,
    TermsAndConditions,
}

/// One of the independent parts of the rental duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationPart {
    Months,
    Days,
    Hours,
}

/// Editable fields of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemField {
    Product,
    Quantity,
    UnitPrice,
}

/// How long the equipment is rented for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RentalDuration {
    pub months: u32,
    pub days: u32,
    pub hours: u32,
}

impl fmt::Display for RentalDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} months, {} days, {} hours",
            self.months, self.days, self.hours
        )
    }
}

/// An unsaved rental order being edited.
///
/// The draft always holds at least one line item.
#[derive(Debug, Clone)]
pub struct RentalOrderDraft {
    customer: String,
    invoice_address: String,
    delivery_address: String,
    rental_template: String,
    expiration_date: String,
    order_date: String,
    duration: RentalDuration,
    items: Vec<LineItem>,
    terms_and_conditions: String,
    terms_accepted: bool,
}

impl Default for RentalOrderDraft {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl RentalOrderDraft {
    /// A fresh draft for `customer`, seeded with one default line item.
    pub fn new(customer: impl Into<String>) -> Self {
        Self {
            customer: customer.into(),
            invoice_address: String::new(),
            delivery_address: String::new(),
            rental_template: String::new(),
            expiration_date: String::new(),
            order_date: String::new(),
            duration: RentalDuration::default(),
            items: vec![LineItem::new("Product 1", 5, BigDecimal::from(200))],
            terms_and_conditions: String::new(),
            terms_accepted: false,
        }
    }

    pub fn for_user(user: &User) -> Self {
        Self::new(user.name.clone())
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Customer => &self.customer,
            DraftField::InvoiceAddress => &self.invoice_address,
            DraftField::DeliveryAddress => &self.delivery_address,
            DraftField::RentalTemplate => &self.rental_template,
            DraftField::ExpirationDate => &self.expiration_date,
            DraftField::OrderDate => &self.order_date,
            DraftField::TermsAndConditions => &self.terms_and_conditions,
        }
    }

    pub fn duration(&self) -> RentalDuration {
        self.duration
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        log::debug!("draft field {:?} set to '{}'", field, value);
        let slot = match field {
            DraftField::Customer => &mut self.customer,
            DraftField::InvoiceAddress => &mut self.invoice_address,
            DraftField::DeliveryAddress => &mut self.delivery_address,
            DraftField::RentalTemplate => &mut self.rental_template,
            DraftField::ExpirationDate => &mut self.expiration_date,
            DraftField::OrderDate => &mut self.order_date,
            DraftField::TermsAndConditions => &mut self.terms_and_conditions,
        };
        *slot = value;
    }

    pub fn set_terms_accepted(&mut self, accepted: bool) {
        self.terms_accepted = accepted;
    }

    pub fn set_duration_field(
        &mut self,
        part: DurationPart,
        value: &InputValue,
    ) -> Result<(), DomainError> {
        let (slot, what) = match part {
            DurationPart::Months => (&mut self.duration.months, "months"),
            DurationPart::Days => (&mut self.duration.days, "days"),
            DurationPart::Hours => (&mut self.duration.hours, "hours"),
        };
        *slot = coerce_count(value, what)?;
        Ok(())
    }

    /// Overwrite one field of the item at `index`. Editing the quantity or
    /// unit price recomputes that item's subtotal and tax.
    pub fn set_item_field(
        &mut self,
        index: usize,
        field: ItemField,
        value: &InputValue,
    ) -> Result<(), DomainError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(DomainError::ItemIndexOutOfRange { index, len })?;

        match field {
            ItemField::Product => item.product = value.as_text().into_owned(),
            ItemField::Quantity => item.set_quantity(coerce_count(value, "quantity")?),
            ItemField::UnitPrice => item.set_unit_price(coerce_amount(value, "unit price")?),
        }
        log::debug!("line item {} field {:?} updated", index, field);
        Ok(())
    }

    /// Append a placeholder item: one unit at 100.
    pub fn add_item(&mut self) {
        let name = format!("Product {}", self.items.len() + 1);
        self.items.push(LineItem::new(name, 1, BigDecimal::from(100)));
    }

    /// Remove the item at `index`. Returns `false` without touching the
    /// draft when it is the last remaining item.
    pub fn remove_item(&mut self, index: usize) -> Result<bool, DomainError> {
        let len = self.items.len();
        if index >= len {
            return Err(DomainError::ItemIndexOutOfRange { index, len });
        }
        if len == 1 {
            log::debug!("refusing to remove the last line item");
            return Ok(false);
        }
        self.items.remove(index);
        Ok(true)
    }

    pub fn compute_totals(&self) -> OrderTotals {
        compute_totals(&self.items)
    }

    /// Snapshot the draft as the payload handed to the order handler.
    pub fn to_payload(&self) -> RentalOrderPayload {
        RentalOrderPayload {
            customer: self.customer.clone(),
            invoice_address: self.invoice_address.clone(),
            delivery_address: self.delivery_address.clone(),
            rental_template: self.rental_template.clone(),
            expiration_date: self.expiration_date.clone(),
            order_date: self.order_date.clone(),
            rental_duration: self.duration.to_string(),
            items: self.items.clone(),
            terms_and_conditions: self.terms_and_conditions.clone(),
            terms_accepted: self.terms_accepted,
            totals: self.compute_totals(),
        }
    }

    /// Hand the draft to `submitter`. Nothing is sent unless the terms have
    /// been accepted.
    pub fn submit<S>(&self, submitter: &S) -> Result<Uuid, DomainError>
    where
        S: OrderSubmitter + ?Sized,
    {
        if !self.terms_accepted {
            log::warn!("submit rejected: terms and conditions not accepted");
            return Err(DomainError::TermsNotAccepted);
        }
        submitter.create_order(self.to_payload())
    }
}
