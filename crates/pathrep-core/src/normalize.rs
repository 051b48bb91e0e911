//! Raw row cleanup.

use pathrep_model::{AdmissionTag, RawRecord, Record};

/// Cleaned records plus the count of rows dropped on the way.
///
/// Dropping is silent by design; the count is surfaced so tests and logs
/// can still see it.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub records: Vec<Record>,
    pub dropped: usize,
}

/// Trim fields, derive the admission tag, and drop incomplete rows.
///
/// A row missing any of test name, booking mode, or subgroup cannot be
/// aggregated or classified and is excluded without error.
#[must_use]
pub fn normalize(raw: &[RawRecord]) -> Normalized {
    let mut records = Vec::with_capacity(raw.len());
    let mut dropped = 0usize;
    for row in raw {
        let test_name = row.test_name.trim();
        let booking_mode = row.booking_mode.trim();
        let subgroup = row.subgroup.trim();
        if test_name.is_empty() || booking_mode.is_empty() || subgroup.is_empty() {
            dropped += 1;
            continue;
        }
        records.push(Record {
            test_name: test_name.to_string(),
            admission: AdmissionTag::from_booking_mode(booking_mode),
            subgroup: subgroup.to_string(),
        });
    }
    Normalized { records, dropped }
}
