// ==========================================
// Logistica ASN - box/pallet consolidation engine
// ==========================================
// Input: ordered shipped units (boxes or pallets)
// Output: ASN equivalence classes (count, average weight, dimensions)
// ==========================================
// Rule: a unit joins a group when its weight is within the tolerance
//       of the group LEADER and type + dimensions match exactly
// ==========================================

use crate::domain::unit::{EquivalenceClass, PackedUnit};
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// Default weight tolerance (kg) for two units to share an ASN line.
pub const DEFAULT_WEIGHT_TOLERANCE_KG: f64 = 0.5;

// ==========================================
// UnitConsolidator
// ==========================================
#[derive(Debug, Clone)]
pub struct UnitConsolidator {
    weight_tolerance_kg: f64,
}

impl Default for UnitConsolidator {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHT_TOLERANCE_KG)
    }
}

impl UnitConsolidator {
    pub fn new(weight_tolerance_kg: f64) -> Self {
        Self {
            weight_tolerance_kg: weight_tolerance_kg.abs(),
        }
    }

    pub fn weight_tolerance_kg(&self) -> f64 {
        self.weight_tolerance_kg
    }

    /// Groups units into equivalence classes.
    ///
    /// Greedy first-wins scan in input order. Each not-yet-assigned unit
    /// starts a group and pulls in every later unassigned unit that matches it.
    /// Members are only compared against the leader, so two members may differ
    /// by up to twice the tolerance.
    ///
    /// # Returns
    /// One class per group, in leader order. Counts sum to `units.len()`.
    #[instrument(skip(self, units), fields(units = units.len(), tolerance = self.weight_tolerance_kg))]
    pub fn group(&self, units: &[PackedUnit]) -> Vec<EquivalenceClass> {
        let mut assigned = vec![false; units.len()];
        let mut classes = Vec::new();

        for (i, leader) in units.iter().enumerate() {
            if assigned[i] {
                continue;
            }
            assigned[i] = true;
            let mut members = vec![leader];

            for (j, candidate) in units.iter().enumerate().skip(i + 1) {
                if assigned[j] {
                    continue;
                }
                if self.matches(leader, candidate) {
                    assigned[j] = true;
                    members.push(candidate);
                }
            }

            let class = summarize(leader, &members);
            if class.weight_spread_kg > self.weight_tolerance_kg {
                warn!(
                    leader = %leader.id,
                    spread = class.weight_spread_kg,
                    tolerance = self.weight_tolerance_kg,
                    "ASN class members differ by more than the tolerance (leader-only comparison)"
                );
            }
            classes.push(class);
        }

        debug!(classes = classes.len(), "units consolidated");
        classes
    }

    fn matches(&self, leader: &PackedUnit, candidate: &PackedUnit) -> bool {
        (leader.weight_kg - candidate.weight_kg).abs() <= self.weight_tolerance_kg
            && leader.same_shape(candidate)
    }
}

/// Groups units with the default 0.5 kg tolerance.
pub fn group_units(units: &[PackedUnit]) -> Vec<EquivalenceClass> {
    UnitConsolidator::default().group(units)
}

/// Keeps the first unit for every id, preserving order.
pub fn dedup_by_id(units: &[PackedUnit]) -> Vec<PackedUnit> {
    let mut seen = HashSet::new();
    units
        .iter()
        .filter(|u| seen.insert(u.id.clone()))
        .cloned()
        .collect()
}

/// Rounds to 2 decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn summarize(leader: &PackedUnit, members: &[&PackedUnit]) -> EquivalenceClass {
    let total: f64 = members.iter().map(|u| u.weight_kg).sum();
    let min = members
        .iter()
        .map(|u| u.weight_kg)
        .fold(f64::INFINITY, f64::min);
    let max = members
        .iter()
        .map(|u| u.weight_kg)
        .fold(f64::NEG_INFINITY, f64::max);

    EquivalenceClass {
        box_type: leader.box_type.clone(),
        count: members.len(),
        average_weight_kg: round2(total / members.len() as f64),
        height_cm: leader.height_cm,
        width_cm: leader.width_cm,
        length_cm: leader.length_cm,
        members: members.iter().map(|u| u.id.clone()).collect(),
        weight_spread_kg: round2(max - min),
    }
}
