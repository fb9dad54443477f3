use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{FilingStatusCode, FilingStatusData};

/// Every filing status's reference data for a single tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTable {
    pub tax_year: i32,
    pub statuses: BTreeMap<FilingStatusCode, FilingStatusData>,
}

impl TaxTable {
    pub fn new(tax_year: i32) -> Self {
        Self {
            tax_year,
            statuses: BTreeMap::new(),
        }
    }

    pub fn get(
        &self,
        status: FilingStatusCode,
    ) -> Option<&FilingStatusData> {
        self.statuses.get(&status)
    }

    /// Filing statuses present in this table, in declaration order.
    pub fn filing_statuses(&self) -> Vec<FilingStatusCode> {
        self.statuses.keys().copied().collect()
    }
}
