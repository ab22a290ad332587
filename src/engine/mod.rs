// ==========================================
// Logistica ASN - engine layer
// ==========================================
// Pure business rules: no file I/O, no operator prompts
// ==========================================

pub mod asn_split;
pub mod consolidation;
pub mod guide;
pub mod labels;
pub mod partition;
pub mod positions;
pub mod retail_order;

// core engine re-exports
pub use asn_split::{default_split_rules, limit_for, split_asn_rows, split_units, SplitRules};
pub use consolidation::{dedup_by_id, group_units, round2, UnitConsolidator, DEFAULT_WEIGHT_TOLERANCE_KG};
pub use guide::{clean_lpn, item_guide, material_guide, ItemGuide, MaterialGuide};
pub use labels::{large_labels, small_labels};
pub use partition::{owner_of, partition_lpns, unique_lpns};
pub use positions::{
    aggregate_positions, bulto_row, lines_for_lpns, positions_for_lpn, units_by_item,
    AssignmentMap, ItemAssignment,
};
pub use retail_order::{build_retail_order, DateStyle, RetailOrder, RetailTotals};
