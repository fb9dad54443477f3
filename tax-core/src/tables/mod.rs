pub mod factory;
pub mod repository;

pub use factory::{TableSourceConfig, TableSourceFactory, TableSourceRegistry};
pub use repository::{TableError, TaxTableRepository};
