mod filing_status;
mod filing_status_data;
mod household_income;
mod tax_bracket;
mod tax_breakdown;
mod tax_table;

pub use filing_status::FilingStatusCode;
pub use filing_status_data::FilingStatusData;
pub use household_income::HouseholdIncome;
pub use tax_bracket::TaxBracket;
pub use tax_breakdown::{BracketContribution, TaxBreakdown, TaxComputation};
pub use tax_table::TaxTable;
