use bigdecimal::BigDecimal;
use serde::Serialize;

use super::line_item::LineItem;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderTotals {
    pub untaxed_total: BigDecimal,
    pub tax: BigDecimal,
    pub total: BigDecimal,
}

/// Sum the subtotals and taxes of `items`. Always derived from the items
/// themselves so it can never disagree with them.
pub fn compute_totals(items: &[LineItem]) -> OrderTotals {
    let untaxed_total: BigDecimal = items.iter().map(|i| i.subtotal()).sum();
    let tax: BigDecimal = items.iter().map(|i| i.tax()).sum();
    let total = &untaxed_total + &tax;
    OrderTotals {
        untaxed_total,
        tax,
        total,
    }
}
