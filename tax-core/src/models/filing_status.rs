use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FilingStatusCode {
    Single,
    MarriedFilingJointly,
    MarriedFilingSeparately,
    HeadOfHousehold,
    QualifyingSurvivingSpouse,
}

impl FilingStatusCode {
    pub fn all() -> &'static [FilingStatusCode] {
        &[
            Self::Single,
            Self::MarriedFilingJointly,
            Self::MarriedFilingSeparately,
            Self::HeadOfHousehold,
            Self::QualifyingSurvivingSpouse,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::MarriedFilingJointly => "MFJ",
            Self::MarriedFilingSeparately => "MFS",
            Self::HeadOfHousehold => "HOH",
            Self::QualifyingSurvivingSpouse => "QSS",
        }
    }

    /// Key used by the published JSON tables (`marriedFilingJointly`, ...).
    pub fn key(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::MarriedFilingJointly => "marriedFilingJointly",
            Self::MarriedFilingSeparately => "marriedFilingSeparately",
            Self::HeadOfHousehold => "headOfHousehold",
            Self::QualifyingSurvivingSpouse => "qualifyingSurvivingSpouse",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::MarriedFilingJointly => "Married Filing Jointly",
            Self::MarriedFilingSeparately => "Married Filing Separately",
            Self::HeadOfHousehold => "Head of Household",
            Self::QualifyingSurvivingSpouse => "Qualifying Surviving Spouse",
        }
    }

    /// Accepts the short code (`MFJ`), the table key (`marriedFilingJointly`)
    /// or the label (`Married Filing Jointly`), ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::all().iter().copied().find(|code| {
            s.eq_ignore_ascii_case(code.as_str())
                || s.eq_ignore_ascii_case(code.key())
                || s.eq_ignore_ascii_case(code.label())
        })
    }
}

impl fmt::Display for FilingStatusCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}
