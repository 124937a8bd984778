//! Order session item blob encoding and validation.
//!
//! The repository stores items as an opaque text column; this module is the
//! only place that knows the blob is a JSON array.

use std::collections::HashSet;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::order_sessions::models::OrderSessionItem;

/// Reasons an item list is rejected before it reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidItemError {
    #[error("item {index} has an empty name")]
    BlankName { index: usize },

    #[error("item {index} has a zero quantity")]
    ZeroQuantity { index: usize },

    #[error("item line {uuid} appears more than once")]
    DuplicateLine { uuid: Uuid },
}

pub(crate) fn encode_items(items: &[OrderSessionItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

pub(crate) fn decode_items(blob: &str) -> Result<Vec<OrderSessionItem>, serde_json::Error> {
    if blob.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(blob)
}

/// Check that an incoming item list can be stored.
///
/// # Errors
///
/// Returns the first problem found, in list order.
pub fn validate_items(items: &[OrderSessionItem]) -> Result<(), InvalidItemError> {
    let mut seen = HashSet::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        if item.name.trim().is_empty() {
            return Err(InvalidItemError::BlankName { index });
        }

        if item.quantity == 0 {
            return Err(InvalidItemError::ZeroQuantity { index });
        }

        if !seen.insert(item.uuid) {
            return Err(InvalidItemError::DuplicateLine { uuid: item.uuid });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn item(name: &str, quantity: u32) -> OrderSessionItem {
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

    #[test]
    fn decodes_stored_blob() -> TestResult {
        let blob = r#"[{
            "uuid": "01950000-0000-7000-8000-000000000001",
            "product_uuid": "01950000-0000-7000-8000-000000000002",
            "name": "Flat White",
            "unit_price": 350,
            "quantity": 2,
            "tax_rate": 2000
        }]"#;

        let items = decode_items(blob)?;

        assert_eq!(items.len(), 1);
        assert_eq!(items.first().map(|item| item.name.as_str()), Some("Flat White"));
        assert_eq!(items.first().and_then(|item| item.variant_uuid), None);

        Ok(())
    }

    #[test]
    fn empty_blob_decodes_to_no_items() -> TestResult {
        assert!(decode_items("")?.is_empty());
        assert!(decode_items("[]")?.is_empty());

        Ok(())
    }

    #[test]
    fn encoding_omits_missing_variant() -> TestResult {
        let encoded = encode_items(&[item("Latte", 1)])?;

        assert!(!encoded.contains("variant_uuid"), "got {encoded}");

        Ok(())
    }

    #[test]
    fn encoding_preserves_line_order() -> TestResult {
        let items = vec![item("Latte", 1), item("Croissant", 2), item("Tea", 1)];

        assert_eq!(decode_items(&encode_items(&items)?)?, items);

        Ok(())
    }

    #[test]
    fn validate_accepts_empty_list() {
        assert_eq!(validate_items(&[]), Ok(()));
    }

    #[test]
    fn validate_rejects_blank_name() {
        let items = vec![item("Latte", 1), item("  ", 1)];

        assert_eq!(
            validate_items(&items),
            Err(InvalidItemError::BlankName { index: 1 })
        );
    }

    #[test]
    fn validate_rejects_zero_quantity() {
        assert_eq!(
            validate_items(&[item("Latte", 0)]),
            Err(InvalidItemError::ZeroQuantity { index: 0 })
        );
    }

    #[test]
    fn validate_rejects_duplicate_lines() {
        let first = item("Latte", 1);
        let duplicate = OrderSessionItem {
            name: "Latte (again)".to_string(),
            ..first.clone()
        };

        assert_eq!(
            validate_items(&[first.clone(), duplicate]),
            Err(InvalidItemError::DuplicateLine { uuid: first.uuid })
        );
    }
}
