use bigdecimal::BigDecimal;
use serde::Serialize;

/// Tax rate applied to every line item subtotal, as a fraction (18%).
pub fn tax_rate() -> BigDecimal {
    BigDecimal::new(18.into(), 2)
}

/// One product line of a rental order.
///
/// `subtotal` and `tax` are derived from `quantity` and `unit_price` and are
/// only ever written by [`LineItem::recompute`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub product: String,
    quantity: u32,
    unit_price: BigDecimal,
    subtotal: BigDecimal,
    tax: BigDecimal,
}

impl LineItem {
    pub fn new(product: impl Into<String>, quantity: u32, unit_price: BigDecimal) -> Self {
        let mut item = Self {
            product: product.into(),
            quantity,
            unit_price,
            subtotal: BigDecimal::default(),
            tax: BigDecimal::default(),
        };
        item.recompute();
        item
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> &BigDecimal {
        &self.unit_price
    }

    pub fn subtotal(&self) -> &BigDecimal {
        &self.subtotal
    }

    pub fn tax(&self) -> &BigDecimal {
        &self.tax
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.recompute();
    }

    pub fn set_unit_price(&mut self, unit_price: BigDecimal) {
        self.unit_price = unit_price;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.subtotal = BigDecimal::from(self.quantity) * &self.unit_price;
        self.tax = &self.subtotal * tax_rate();
    }
}
