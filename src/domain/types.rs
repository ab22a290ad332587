// ==========================================
// Logistica ASN - domain types
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// ShipmentKind - pallets vs loose boxes
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentKind {
    Pallet,
    Bulto,
}

impl ShipmentKind {
    /// Guide title used for the shipment kind ("Pallets" / "Bultos").
    pub fn guide_title(&self) -> &'static str {
        match self {
            ShipmentKind::Pallet => "Pallets",
            ShipmentKind::Bulto => "Bultos",
        }
    }
}

impl fmt::Display for ShipmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipmentKind::Pallet => write!(f, "PALLET"),
            ShipmentKind::Bulto => write!(f, "BULTO"),
        }
    }
}

// ==========================================
// Answer - three-way operator answer
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Exit,
}

// ==========================================
// ItemStore - item catalog backend
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStore {
    Json,
    Sqlite,
}

impl ItemStore {
    pub fn from_db_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "json" => Some(ItemStore::Json),
            "sqlite" => Some(ItemStore::Sqlite),
            _ => None,
        }
    }
}

impl fmt::Display for ItemStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemStore::Json => write!(f, "json"),
            ItemStore::Sqlite => write!(f, "sqlite"),
        }
    }
}
