pub mod draft;
pub mod errors;
pub mod input;
pub mod line_item;
pub mod order;
pub mod ports;
pub mod totals;
pub mod user;
