// ==========================================
// Logistica ASN - LPN partition engine
// ==========================================
// Input: flat LPN list of the shipment + declared pallets
// Output: palletized LPNs / loose LPNs ("bultos")
// ==========================================
// Rule: set membership against the flatten of every pallet's LPNs
// Rule: an LPN claimed by several pallets is placed once, first pallet owns it
// ==========================================

use crate::domain::unit::{Pallet, PalletConflict, PartitionResult};
use std::collections::{HashMap, HashSet};
use tracing::{instrument, warn};

/// Splits the shipment LPNs into palletized and loose buckets.
///
/// # Arguments
/// - `all_lpns`: every LPN of the shipment; duplicates collapse to the first occurrence
/// - `pallets`: operator-declared pallets
///
/// # Returns
/// Both buckets keep the order of `all_lpns` and are disjoint.
#[instrument(skip_all, fields(lpns = all_lpns.len(), pallets = pallets.len()))]
pub fn partition_lpns(all_lpns: &[String], pallets: &[Pallet]) -> PartitionResult {
    let owners = pallet_owners(pallets);

    let mut seen = HashSet::new();
    let mut result = PartitionResult::default();
    for lpn in all_lpns {
        if !seen.insert(lpn.as_str()) {
            continue;
        }
        if owners.contains_key(lpn.as_str()) {
            result.palletized.push(lpn.clone());
        } else {
            result.loose.push(lpn.clone());
        }
    }

    for pallet in pallets {
        for lpn in &pallet.lpns {
            if !seen.contains(lpn.as_str()) && !result.undeclared.contains(lpn) {
                warn!(lpn = %lpn, pallet = %pallet.id, "pallet declares an LPN absent from the shipment");
                result.undeclared.push(lpn.clone());
            }
        }
    }

    for lpn in &result.palletized {
        let claiming = &owners[lpn.as_str()];
        if claiming.len() > 1 {
            warn!(lpn = %lpn, pallets = ?claiming, "LPN declared in more than one pallet");
            result.conflicts.push(PalletConflict {
                lpn: lpn.clone(),
                pallets: claiming.iter().map(|s| s.to_string()).collect(),
            });
        }
    }

    result
}

/// Pallet that owns the LPN: the first one declaring it.
pub fn owner_of<'a>(lpn: &str, pallets: &'a [Pallet]) -> Option<&'a Pallet> {
    pallets.iter().find(|p| p.contains(lpn))
}

/// LPNs of the shipment in first-seen order, without duplicates.
pub fn unique_lpns<'a, I>(lpns: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    lpns.into_iter()
        .filter(|l| seen.insert(*l))
        .map(str::to_string)
        .collect()
}

fn pallet_owners(pallets: &[Pallet]) -> HashMap<&str, Vec<&str>> {
    let mut owners: HashMap<&str, Vec<&str>> = HashMap::new();
    for pallet in pallets {
        for lpn in &pallet.lpns {
            let claiming = owners.entry(lpn.as_str()).or_default();
            if !claiming.contains(&pallet.id.as_str()) {
                claiming.push(pallet.id.as_str());
            }
        }
    }
    owners
}
