//! Test Helpers

use uuid::Uuid;

use crate::domain::order_sessions::models::OrderSessionItem;

/// An order line with fresh ids, a 3.50 unit price and 20% tax.
pub(crate) fn make_item(name: &str, quantity: u32) -> OrderSessionItem {
    OrderSessionItem {
        uuid: Uuid::now_v7(),
        product_uuid: Uuid::now_v7(),
        variant_uuid: None,
        name: name.to_string(),
        unit_price: 350,
        quantity,
        tax_rate: 2000,
    }
}
