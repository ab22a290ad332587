// ==========================================
// Logistica ASN - domain layer
// ==========================================
// Responsibility: fixed-shape records for every entity
// Rule: no file access, no prompting
// ==========================================

pub mod catalog;
pub mod order;
pub mod types;
pub mod unit;

pub use catalog::{
    BoxCatalog, BoxChanges, BoxType, ClientRecord, ItemCatalog, ItemRecord, OwnerDirectory,
};
pub use order::{
    BultoRow, ItemUnits, LabelParty, LargeLabel, Position, RetailOrderRow, SmallLabel, WmsLine,
    POSITION_UNIT,
};
pub use types::{Answer, ItemStore, ShipmentKind};
pub use unit::{
    EquivalenceClass, PackedUnit, Pallet, PalletConflict, PartitionResult, PALLET_BOX_TYPE,
};
