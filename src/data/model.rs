use std::collections::BTreeSet;
use std::fmt;

use super::loader::LoadError;

// ---------------------------------------------------------------------------
// Outcome – the binary success flag of a launch
// ---------------------------------------------------------------------------

/// Launch outcome, stored in the source data as `1` (success) / `0` (failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    /// Decode the binary flag used by the source data.
    pub fn from_flag(flag: f64) -> Option<Self> {
        if flag == 1.0 {
            Some(Outcome::Success)
        } else if flag == 0.0 {
            Some(Outcome::Failure)
        } else {
            None
        }
    }

    /// Numeric flag, used as the y coordinate of the scatter chart.
    pub fn as_flag(self) -> f64 {
        match self {
            Outcome::Success => 1.0,
            Outcome::Failure => 0.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Success => "Success",
            Outcome::Failure => "Failure",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// Launch site identifier (categorical, not unique).
    pub site: String,
    /// Payload mass in kilograms; finite and non-negative.
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    /// Booster version category, used for colouring.
    pub booster_category: String,
}

impl LaunchRecord {
    pub fn new(
        site: impl Into<String>,
        payload_mass_kg: f64,
        outcome: Outcome,
        booster_category: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            payload_mass_kg,
            outcome,
            booster_category: booster_category.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// RecordStore – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full, immutable dataset with indices computed once at load time.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<LaunchRecord>,
    /// Unique sites in order of first appearance.
    sites: Vec<String>,
    /// Sorted unique booster categories.
    booster_categories: Vec<String>,
    min_payload_mass: f64,
    max_payload_mass: f64,
}

impl RecordStore {
    /// Build the store and its indices. An empty table is rejected because
    /// the range selector needs observed payload bounds.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, LoadError> {
        if records.is_empty() {
            return Err(LoadError::Empty);
        }

        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut sites = Vec::new();
        let mut categories: BTreeSet<String> = BTreeSet::new();
        let mut min_payload_mass = f64::INFINITY;
        let mut max_payload_mass = f64::NEG_INFINITY;

        for rec in &records {
            if seen.insert(rec.site.as_str()) {
                sites.push(rec.site.clone());
            }
            categories.insert(rec.booster_category.clone());
            min_payload_mass = min_payload_mass.min(rec.payload_mass_kg);
            max_payload_mass = max_payload_mass.max(rec.payload_mass_kg);
        }

        Ok(RecordStore {
            sites,
            booster_categories: categories.into_iter().collect(),
            min_payload_mass,
            max_payload_mass,
            records,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    /// Smallest payload mass in the dataset; seeds the range selector.
    pub fn min_payload_mass(&self) -> f64 {
        self.min_payload_mass
    }

    /// Largest payload mass in the dataset; seeds the range selector.
    pub fn max_payload_mass(&self) -> f64 {
        self.max_payload_mass
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// The four-launch dataset used across the test modules.
    pub(crate) fn sample_records() -> Vec<LaunchRecord> {
        vec![
            LaunchRecord::new("CCAFS", 5000.0, Outcome::Success, "v1.0"),
            LaunchRecord::new("CCAFS", 3000.0, Outcome::Failure, "v1.0"),
            LaunchRecord::new("KSC", 7000.0, Outcome::Success, "v1.1"),
            LaunchRecord::new("KSC", 2000.0, Outcome::Success, "v1.1"),
        ]
    }

    #[test]
    fn store_computes_payload_bounds() {
        let store = RecordStore::from_records(sample_records()).unwrap();
        assert_eq!(store.min_payload_mass(), 2000.0);
        assert_eq!(store.max_payload_mass(), 7000.0);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn sites_keep_first_appearance_order() {
        let mut records = sample_records();
        records.insert(0, LaunchRecord::new("VAFB", 500.0, Outcome::Failure, "FT"));
        let store = RecordStore::from_records(records).unwrap();
        assert_eq!(store.sites(), ["VAFB", "CCAFS", "KSC"]);
        assert_eq!(store.booster_categories(), ["FT", "v1.0", "v1.1"]);
    }

    #[test]
    fn empty_store_is_rejected() {
        let err = RecordStore::from_records(Vec::new()).unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn outcome_flag_decoding() {
        assert_eq!(Outcome::from_flag(1.0), Some(Outcome::Success));
        assert_eq!(Outcome::from_flag(0.0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_flag(2.0), None);
        assert_eq!(Outcome::from_flag(0.5), None);
    }
}
