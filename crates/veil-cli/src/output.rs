//! Output formatting helpers for the CLI.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use comfy_table::presets::NOTHING;
use comfy_table::{ContentArrangement, Table};

use veil_core::storage::StoreHeader;
use veil_core::PayloadKind;

/// One row of `veil list`.
pub struct SlotSummary {
    pub key: String,
    pub stored_bytes: usize,
}

pub fn value_json(key: &str, kind: PayloadKind, value: &str) -> serde_json::Value {
    serde_json::json!({
        "key": key,
        "kind": kind,
        "value": value,
    })
}

pub fn raw_json(key: &str, bytes: &[u8], header: &StoreHeader) -> serde_json::Value {
    serde_json::json!({
        "key": key,
        "length": bytes.len(),
        "hex": hex::encode(bytes),
        "base64": STANDARD.encode(bytes),
        "chain": header.chain,
    })
}

pub fn slots_json(slots: &[SlotSummary]) -> Vec<serde_json::Value> {
    slots
        .iter()
        .map(|slot| {
            serde_json::json!({
                "key": slot.key,
                "stored_bytes": slot.stored_bytes,
            })
        })
        .collect()
}

/// Print raw stored bytes in human-readable format.
pub fn print_raw(key: &str, bytes: &[u8], header: &StoreHeader, quiet: bool) {
    if quiet {
        println!("{}", hex::encode(bytes));
        return;
    }
    println!("Key: {}", key);
    println!("Length: {} bytes", bytes.len());
    if let Some(chain) = &header.chain {
        println!(
            "Chain: encoding {}, {} cipher layer(s)",
            chain.encoding.as_deref().unwrap_or("none"),
            chain.cipher_fingerprints.len()
        );
    }
    println!("Hex: {}", hex::encode(bytes));
    println!("Base64: {}", STANDARD.encode(bytes));
}

/// Render the slot list as a borderless table.
pub fn slots_table(slots: &[SlotSummary]) -> String {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["KEY", "STORED BYTES"]);
    for slot in slots {
        table.add_row(vec![slot.key.clone(), slot.stored_bytes.to_string()]);
    }
    table.to_string()
}
