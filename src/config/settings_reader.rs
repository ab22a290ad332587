// ==========================================
// Logistica ASN - settings reader trait
// ==========================================
// Read-only view of the configuration used by the client processes
// Implemented by ConfigManager (config_kv table)
// ==========================================

use crate::domain::order::LabelParty;
use crate::domain::types::ItemStore;
use crate::engine::asn_split::SplitRules;
use std::error::Error;

// ==========================================
// SettingsReader Trait
// ==========================================
pub trait SettingsReader {
    /// Weight tolerance (kg) for ASN grouping.
    ///
    /// # Default
    /// - 0.5
    fn weight_tolerance_kg(&self) -> Result<f64, Box<dyn Error>>;

    /// Operator message language ("es" / "en").
    ///
    /// # Default
    /// - es
    fn locale(&self) -> Result<String, Box<dyn Error>>;

    /// Item catalog backend.
    ///
    /// # Default
    /// - json
    fn item_store(&self) -> Result<ItemStore, Box<dyn Error>>;

    /// CLIENTE / DESTINO / PROVEEDOR printed on Collahuasi large labels.
    fn label_party(&self) -> Result<LabelParty, Box<dyn Error>>;

    /// SKU -> unit limit rules for the ASN split.
    ///
    /// # Default
    /// - 3650138 -> 2, 7641117 -> 8
    fn asn_split_rules(&self) -> Result<SplitRules, Box<dyn Error>>;

    /// Index of the client record in client_db.json for a retail client.
    ///
    /// # Default
    /// - sodimac -> 2, tottus -> 1
    fn client_index(&self, client: &str) -> Result<Option<usize>, Box<dyn Error>>;
}
