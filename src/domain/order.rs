use serde::Serialize;

use super::line_item::LineItem;
use super::totals::OrderTotals;

/// Everything handed to the order creation handler on submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalOrderPayload {
    pub customer: String,
    pub invoice_address: String,
    pub delivery_address: String,
    pub rental_template: String,
    pub expiration_date: String,
    pub order_date: String,
    /// Formatted as `"<months> months, <days> days, <hours> hours"`.
    pub rental_duration: String,
    pub items: Vec<LineItem>,
    pub terms_and_conditions: String,
    pub terms_accepted: bool,
    pub totals: OrderTotals,
}
