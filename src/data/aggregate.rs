use std::collections::BTreeMap;

use super::filter::SiteFilter;
use super::model::{LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// Aggregation mode
// ---------------------------------------------------------------------------

/// Granularity of the outcome summary, resolved once per interaction from
/// the site selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregationMode {
    /// Successful launches counted per site.
    BySite,
    /// One site's launches counted per outcome.
    ByOutcome(String),
}

impl From<&SiteFilter> for AggregationMode {
    fn from(filter: &SiteFilter) -> Self {
        match filter {
            SiteFilter::All => AggregationMode::BySite,
            SiteFilter::Site(site) => AggregationMode::ByOutcome(site.clone()),
        }
    }
}

/// Counts keyed by site (`BySite`) or by outcome label (`ByOutcome`).
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeSummary {
    pub mode: AggregationMode,
    pub counts: BTreeMap<String, usize>,
}

impl OutcomeSummary {
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Reduce records into outcome counts.
///
/// * `BySite` counts successes per site; failures and sites without a
///   success produce no entry.
/// * `ByOutcome` expects the site's records already filtered upstream and
///   reports both `Success` and `Failure`, zero included.
///
/// Empty input always yields an empty mapping.
pub fn aggregate_outcome_counts<'a, I>(records: I, mode: &AggregationMode) -> OutcomeSummary
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    match mode {
        AggregationMode::BySite => {
            for rec in records {
                if rec.outcome == Outcome::Success {
                    *counts.entry(rec.site.clone()).or_default() += 1;
                }
            }
        }
        AggregationMode::ByOutcome(_) => {
            let mut records = records.into_iter().peekable();
            if records.peek().is_some() {
                counts.insert(Outcome::Success.label().to_string(), 0);
                counts.insert(Outcome::Failure.label().to_string(), 0);
            }
            for rec in records {
                *counts.entry(rec.outcome.label().to_string()).or_default() += 1;
            }
        }
    }

    OutcomeSummary {
        mode: mode.clone(),
        counts,
    }
}

// ---------------------------------------------------------------------------
// Point projection
// ---------------------------------------------------------------------------

/// The three fields the scatter chart needs from a record.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_category: String,
}

/// Project records onto [`PayloadPoint`]s, one per record, in input order.
pub fn project_payload_points<'a, I>(records: I) -> Vec<PayloadPoint>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    records
        .into_iter()
        .map(|rec| PayloadPoint {
            payload_mass_kg: rec.payload_mass_kg,
            outcome: rec.outcome,
            booster_category: rec.booster_category.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter_by_payload, filter_by_site};
    use crate::data::model::tests::sample_records;

    fn counts(pairs: &[(&str, usize)]) -> BTreeMap<String, usize> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn all_sites_counts_successes_per_site() {
        let records = sample_records();
        let mode = AggregationMode::from(&SiteFilter::All);
        let summary = aggregate_outcome_counts(filter_by_site(&records, &SiteFilter::All), &mode);
        assert_eq!(summary.mode, AggregationMode::BySite);
        assert_eq!(summary.counts, counts(&[("CCAFS", 1), ("KSC", 2)]));
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn single_site_counts_both_outcomes() {
        let records = sample_records();
        let filter = SiteFilter::parse("KSC");
        let mode = AggregationMode::from(&filter);
        let summary = aggregate_outcome_counts(filter_by_site(&records, &filter), &mode);
        assert_eq!(summary.mode, AggregationMode::ByOutcome("KSC".into()));
        assert_eq!(summary.counts, counts(&[("Success", 2), ("Failure", 0)]));
        assert_eq!(summary.total(), 2);
    }

    #[test]
    fn mixed_site_sums_to_input_length() {
        let records = sample_records();
        let filter = SiteFilter::parse("CCAFS");
        let site_records = filter_by_site(&records, &filter);
        let mode = AggregationMode::from(&filter);
        let summary = aggregate_outcome_counts(site_records.iter().copied(), &mode);
        assert_eq!(summary.counts, counts(&[("Success", 1), ("Failure", 1)]));
        assert_eq!(summary.total(), site_records.len());
    }

    #[test]
    fn empty_input_yields_empty_mapping() {
        let none: Vec<LaunchRecord> = Vec::new();
        for mode in [AggregationMode::BySite, AggregationMode::ByOutcome("KSC".into())] {
            let summary = aggregate_outcome_counts(&none, &mode);
            assert!(summary.counts.is_empty());
            assert_eq!(summary.total(), 0);
        }
    }

    #[test]
    fn all_failures_by_site_is_empty() {
        let records = vec![LaunchRecord::new("VAFB", 100.0, Outcome::Failure, "v1.0")];
        let summary = aggregate_outcome_counts(&records, &AggregationMode::BySite);
        assert!(summary.counts.is_empty());
    }

    #[test]
    fn projection_copies_fields_in_order() {
        let records = sample_records();
        let in_range = filter_by_payload(&records, 2000.0, 5000.0);
        let points = project_payload_points(in_range.iter().copied());
        assert_eq!(points.len(), in_range.len());
        let masses: Vec<f64> = points.iter().map(|p| p.payload_mass_kg).collect();
        assert_eq!(masses, [5000.0, 3000.0, 2000.0]);
        assert_eq!(points[1].outcome, Outcome::Failure);
        assert_eq!(points[2].booster_category, "v1.1");
    }

    #[test]
    fn projection_of_nothing_is_empty() {
        let none: Vec<LaunchRecord> = Vec::new();
        assert!(project_payload_points(&none).is_empty());
    }
}
