// ==========================================
// Logistica ASN - shipped unit domain model
// ==========================================
// Units: one packed box (LPN) or one pallet
// Derived: EquivalenceClass, PartitionResult
// ==========================================

use serde::{Deserialize, Serialize};

/// Box-type sentinel used when a pallet is viewed as a unit.
pub const PALLET_BOX_TYPE: &str = "Pallet";

// ==========================================
// PackedUnit - one physical shipping unit
// ==========================================
// Immutable once captured from the operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackedUnit {
    pub id: String,       // LPN or pallet id
    pub weight_kg: f64,   // real weight (kg)
    pub box_type: String, // box name or PALLET_BOX_TYPE
    pub height_cm: f64,
    pub length_cm: f64,
    pub width_cm: f64,
}

impl PackedUnit {
    pub fn new(
        id: impl Into<String>,
        weight_kg: f64,
        box_type: impl Into<String>,
        height_cm: f64,
        length_cm: f64,
        width_cm: f64,
    ) -> Self {
        Self {
            id: id.into(),
            weight_kg,
            box_type: box_type.into(),
            height_cm,
            length_cm,
            width_cm,
        }
    }

    /// Same box type and exactly the same three dimensions.
    pub fn same_shape(&self, other: &PackedUnit) -> bool {
        self.box_type == other.box_type
            && self.height_cm == other.height_cm
            && self.length_cm == other.length_cm
            && self.width_cm == other.width_cm
    }

    pub fn is_pallet(&self) -> bool {
        self.box_type == PALLET_BOX_TYPE
    }
}

// ==========================================
// EquivalenceClass - one ASN summary line
// ==========================================
// Type and dimensions are those of the group leader (first unit seen)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquivalenceClass {
    pub box_type: String,
    pub count: usize,
    pub average_weight_kg: f64, // rounded to 2 decimals
    pub height_cm: f64,
    pub width_cm: f64,
    pub length_cm: f64,
    pub members: Vec<String>,   // unit ids, leader first
    pub weight_spread_kg: f64,  // max - min weight among members
}

// ==========================================
// Pallet - operator-declared LPN consolidation
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pallet {
    pub id: String, // "Pallet1", "Pallet2", ...
    pub lpns: Vec<String>,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub length_cm: f64,
    pub width_cm: f64,
}

impl Pallet {
    /// Pallet identifier for the 1-based pallet number.
    pub fn id_for(number: usize) -> String {
        format!("Pallet{}", number)
    }

    /// Pallet seen as a single unit with the "Pallet" box type.
    pub fn as_unit(&self) -> PackedUnit {
        PackedUnit::new(
            self.id.clone(),
            self.weight_kg,
            PALLET_BOX_TYPE,
            self.height_cm,
            self.length_cm,
            self.width_cm,
        )
    }

    pub fn contains(&self, lpn: &str) -> bool {
        self.lpns.iter().any(|l| l == lpn)
    }
}

// ==========================================
// PartitionResult - LPNs split into pallet / bultos
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionResult {
    pub palletized: Vec<String>,           // in some pallet, input order
    pub loose: Vec<String>,                // default bucket ("bultos"), input order
    pub conflicts: Vec<PalletConflict>,    // LPN claimed by more than one pallet
    pub undeclared: Vec<String>,           // claimed by a pallet but absent from the shipment
}

/// An LPN that more than one pallet declared. The first pallet owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PalletConflict {
    pub lpn: String,
    pub pallets: Vec<String>,
}

impl PartitionResult {
    pub fn total(&self) -> usize {
        self.palletized.len() + self.loose.len()
    }

    pub fn is_palletized(&self, lpn: &str) -> bool {
        self.palletized.iter().any(|l| l == lpn)
    }
}
