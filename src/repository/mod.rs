// ==========================================
// Logistica ASN - repository layer
// ==========================================
// Responsibility: load / save of catalogs and client data
// No business rules here
// ==========================================

pub mod box_catalog_repo;
pub mod client_repo;
pub mod error;
pub mod item_catalog_repo;

pub use box_catalog_repo::{BoxCatalogRepository, PipeFileBoxCatalogRepository};
pub use client_repo::{ClientRepository, JsonClientRepository};
pub use error::{RepositoryError, RepositoryResult};
pub use item_catalog_repo::{
    ItemCatalogRepository, JsonItemCatalogRepository, SqliteItemCatalogRepository,
};
