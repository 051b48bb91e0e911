//! Test order records before and after normalization.

use serde::{Deserialize, Serialize};

use crate::category::{Category, ClassificationSource};

/// A row as read from the source table; any field may still be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub test_name: String,
    pub booking_mode: String,
    pub subgroup: String,
}

/// Admission mode of a test order.
///
/// There is no unknown state: anything that does not look like an
/// inpatient booking counts as an outpatient indent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdmissionTag {
    Inpatient,
    OutpatientIndent,
}

impl AdmissionTag {
    /// Derive the tag from free-text booking mode.
    ///
    /// Case-insensitive substring match: anything containing `IPD` is
    /// inpatient, everything else (including empty) is an outpatient indent.
    #[must_use]
    pub fn from_booking_mode(value: &str) -> Self {
        if value.trim().to_uppercase().contains("IPD") {
            AdmissionTag::Inpatient
        } else {
            AdmissionTag::OutpatientIndent
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AdmissionTag::Inpatient => "IPD",
            AdmissionTag::OutpatientIndent => "OPD Indent",
        }
    }
}

/// A cleaned test order ready for classification and aggregation.
///
/// `test_name` keeps its source spelling; comparisons that need to be
/// case-insensitive fold at the comparison site instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub test_name: String,
    pub admission: AdmissionTag,
    pub subgroup: String,
}

/// A record together with its final category and how it was decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    pub record: Record,
    pub category: Category,
    pub source: ClassificationSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipd_substring_is_inpatient() {
        assert_eq!(
            AdmissionTag::from_booking_mode("IPD"),
            AdmissionTag::Inpatient
        );
        assert_eq!(
            AdmissionTag::from_booking_mode("ward ipd transfer"),
            AdmissionTag::Inpatient
        );
    }

    #[test]
    fn everything_else_is_outpatient_indent() {
        assert_eq!(
            AdmissionTag::from_booking_mode("OPD"),
            AdmissionTag::OutpatientIndent
        );
        assert_eq!(
            AdmissionTag::from_booking_mode(""),
            AdmissionTag::OutpatientIndent
        );
        assert_eq!(
            AdmissionTag::from_booking_mode("walk-in"),
            AdmissionTag::OutpatientIndent
        );
    }
}
