// ==========================================
// Logistica ASN - configuration layer
// ==========================================
// Responsibility: settings with typed defaults
// Storage: config_kv table
// ==========================================

pub mod config_manager;
pub mod settings_reader;

// core re-exports
pub use config_manager::{config_keys, ConfigManager};
pub use settings_reader::SettingsReader;
