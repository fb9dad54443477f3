//! Tax table sources: the bundled federal tables and CSV directories.

pub mod factory;
pub mod loader;
pub mod repository;
pub mod validate;

pub use factory::{CsvSourceFactory, EmbeddedSourceFactory, build_registry, default_data_dir};
pub use loader::{
    BracketKind, StandardDeductionRecord, TaxBracketRecord, TaxTableLoader, TaxTableLoaderError,
};
pub use repository::{BRACKETS_FILE, DEDUCTIONS_FILE, StaticTaxTables};
pub use validate::{BracketValidationError, validate_brackets};
