// ==========================================
// Logistica ASN - core library
// ==========================================
// Dispatch back-office: bultos, pallets, ASN summaries,
// guides and labels per client from WMS extracts
// ==========================================

// i18n initialization
rust_i18n::i18n!("locales", fallback = "es");

// ==========================================
// Modules
// ==========================================

// Domain layer - entities and types
pub mod domain;

// Repository layer - catalogs and client data
pub mod repository;

// Engine layer - business rules
pub mod engine;

// Import layer - WMS and order extracts
pub mod importer;

// Export layer - output workbooks
pub mod export;

// Configuration layer
pub mod config;

// SQLite connection setup
pub mod db;

// Logging
pub mod logging;

// Internationalization
pub mod i18n;

// Operator interaction
pub mod prompt;

// Client processes
pub mod clients;

// Application layer - terminal menus
pub mod app;

// ==========================================
// Core re-exports
// ==========================================

// Domain types
pub use domain::types::{Answer, ItemStore, ShipmentKind};

// Domain entities
pub use domain::{
    BoxCatalog, BoxType, ClientRecord, EquivalenceClass, ItemCatalog, ItemRecord, PackedUnit,
    Pallet, PartitionResult, WmsLine,
};

// Engine
pub use engine::{group_units, partition_lpns, UnitConsolidator};

// Client processes
pub use clients::{process_for, run_client, ClientContext, ClientInput, ClientProcess, ProcessOutcome};

// ==========================================
// Constants
// ==========================================

// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Application name
pub const APP_NAME: &str = "Logistica ASN";
