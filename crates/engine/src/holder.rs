//! Detection of holdings from one specific contract.
//!
//! Upstream records are opaque JSON and the contract address has shown up
//! under several shapes across API versions. Extraction checks each known
//! shape in a fixed priority order and the first present string wins.

use serde_json::Value;

/// Whether a single record belongs to `target`.
///
/// Address comparison is ASCII case-insensitive; no checksum validation and
/// no 0x-prefix normalization, so `target` must use the same textual format
/// the upstream API emits.
pub fn matches_contract(record: &Value, target: &str) -> bool {
    contract_address(record).is_some_and(|addr| addr.eq_ignore_ascii_case(target))
}

/// Candidate contract address of a record, in priority order:
/// `contract.address`, `token_address`, `asset_contract.address` (legacy),
/// `contract_address`. Fields that are present but not strings fall through
/// to the next shape.
fn contract_address(record: &Value) -> Option<&str> {
    record
        .pointer("/contract/address")
        .and_then(Value::as_str)
        .or_else(|| record.get("token_address").and_then(Value::as_str))
        .or_else(|| record.pointer("/asset_contract/address").and_then(Value::as_str))
        .or_else(|| record.get("contract_address").and_then(Value::as_str))
}
