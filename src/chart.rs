use std::collections::BTreeMap;

use eframe::egui::Color32;

use crate::color::ColorMap;
use crate::data::aggregate::{
    AggregationMode, OutcomeSummary, PayloadPoint, aggregate_outcome_counts,
    project_payload_points,
};
use crate::data::filter::{PayloadRange, SiteFilter, filter_by_payload, filter_by_site};
use crate::data::model::{Outcome, RecordStore};

pub const SCATTER_X_LABEL: &str = "Payload Mass (kg)";
pub const SCATTER_Y_LABEL: &str = "Launch Outcome";

const SUCCESS_COLOR: Color32 = Color32::from_rgb(76, 175, 80);
const FAILURE_COLOR: Color32 = Color32::from_rgb(229, 57, 53);

// ---------------------------------------------------------------------------
// Colours shared by both charts
// ---------------------------------------------------------------------------

/// Per-dataset colour assignments.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartColors {
    pub sites: ColorMap,
    pub boosters: ColorMap,
}

impl ChartColors {
    pub fn for_store(store: &RecordStore) -> Self {
        Self {
            sites: ColorMap::new(store.sites().iter().map(String::as_str)),
            boosters: ColorMap::new(store.booster_categories().iter().map(String::as_str)),
        }
    }
}

fn outcome_color(label: &str) -> Color32 {
    if label == Outcome::Success.label() {
        SUCCESS_COLOR
    } else {
        FAILURE_COLOR
    }
}

// ---------------------------------------------------------------------------
// Summary (pie) chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    /// Share of the chart total, in `[0, 1]`.
    pub fraction: f64,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl SummaryChart {
    pub fn from_summary(summary: &OutcomeSummary, colors: &ChartColors) -> Self {
        let total = summary.total();
        let title = match &summary.mode {
            AggregationMode::BySite => "Total Successful Launches by Site".to_string(),
            AggregationMode::ByOutcome(site) => format!("Success vs Failure for site {site}"),
        };

        let slices = summary
            .counts
            .iter()
            .map(|(label, &count)| PieSlice {
                label: label.clone(),
                count,
                fraction: if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                },
                color: match summary.mode {
                    AggregationMode::BySite => colors.sites.color_for(label),
                    AggregationMode::ByOutcome(_) => outcome_color(label),
                },
            })
            .collect();

        SummaryChart { title, slices }
    }

    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

// ---------------------------------------------------------------------------
// Payload / outcome scatter chart
// ---------------------------------------------------------------------------

/// Points of one booster category, as `[payload_mass_kg, outcome_flag]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub category: String,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub title: String,
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    pub fn from_points(
        site_filter: &SiteFilter,
        points: &[PayloadPoint],
        colors: &ChartColors,
    ) -> Self {
        let title = match site_filter {
            SiteFilter::All => "Payload vs. Outcome for All Sites".to_string(),
            SiteFilter::Site(site) => format!("Payload vs. Outcome for site {site}"),
        };

        let mut grouped: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
        for p in points {
            grouped
                .entry(p.booster_category.as_str())
                .or_default()
                .push([p.payload_mass_kg, p.outcome.as_flag()]);
        }

        let series = grouped
            .into_iter()
            .map(|(category, points)| ScatterSeries {
                category: category.to_string(),
                color: colors.boosters.color_for(category),
                points,
            })
            .collect();

        ScatterChart { title, series }
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Filter → aggregate → chart pipelines
// ---------------------------------------------------------------------------

/// Summary chart for a site selection. Independent of the payload range.
pub fn summary_chart(
    store: &RecordStore,
    site_filter: &SiteFilter,
    colors: &ChartColors,
) -> SummaryChart {
    let mode = AggregationMode::from(site_filter);
    let records = filter_by_site(store.records(), site_filter);
    let summary = aggregate_outcome_counts(records, &mode);
    SummaryChart::from_summary(&summary, colors)
}

/// Scatter chart for a site selection and payload range.
pub fn scatter_chart(
    store: &RecordStore,
    site_filter: &SiteFilter,
    range: PayloadRange,
    colors: &ChartColors,
) -> ScatterChart {
    let by_site = filter_by_site(store.records(), site_filter);
    let in_range = filter_by_payload(by_site, range.low, range.high);
    let points = project_payload_points(in_range);
    ScatterChart::from_points(site_filter, &points, colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_records;

    fn store() -> RecordStore {
        RecordStore::from_records(sample_records()).unwrap()
    }

    #[test]
    fn all_sites_summary_has_one_slice_per_site() {
        let store = store();
        let colors = ChartColors::for_store(&store);
        let chart = summary_chart(&store, &SiteFilter::All, &colors);

        assert_eq!(chart.title, "Total Successful Launches by Site");
        let labels: Vec<(&str, usize)> = chart
            .slices
            .iter()
            .map(|s| (s.label.as_str(), s.count))
            .collect();
        assert_eq!(labels, [("CCAFS", 1), ("KSC", 2)]);
        assert!((chart.slices[1].fraction - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(chart.slices[0].color, colors.sites.color_for("CCAFS"));
    }

    #[test]
    fn single_site_summary_shows_both_outcomes() {
        let store = store();
        let colors = ChartColors::for_store(&store);
        let chart = summary_chart(&store, &SiteFilter::parse("KSC"), &colors);

        assert_eq!(chart.title, "Success vs Failure for site KSC");
        let failure = chart.slices.iter().find(|s| s.label == "Failure").unwrap();
        let success = chart.slices.iter().find(|s| s.label == "Success").unwrap();
        assert_eq!((failure.count, success.count), (0, 2));
        assert_eq!(success.color, SUCCESS_COLOR);
        assert_eq!(success.fraction, 1.0);
    }

    #[test]
    fn unknown_site_summary_is_empty() {
        let store = store();
        let colors = ChartColors::for_store(&store);
        let chart = summary_chart(&store, &SiteFilter::parse("Kwajalein"), &colors);
        assert!(chart.is_empty());
        assert!(chart.slices.is_empty());
    }

    #[test]
    fn scatter_respects_range_and_groups_by_booster() {
        let store = store();
        let colors = ChartColors::for_store(&store);
        let range = PayloadRange::new(2000.0, 5000.0);
        let chart = scatter_chart(&store, &SiteFilter::All, range, &colors);

        assert_eq!(chart.title, "Payload vs. Outcome for All Sites");
        assert_eq!(chart.point_count(), 3);
        assert_eq!(chart.series[0].category, "v1.0");
        assert_eq!(chart.series[0].points, [[5000.0, 1.0], [3000.0, 0.0]]);
        assert_eq!(chart.series[1].points, [[2000.0, 1.0]]);
        assert_eq!(chart.series[1].color, colors.boosters.color_for("v1.1"));
    }

    #[test]
    fn scatter_for_site_uses_site_title() {
        let store = store();
        let colors = ChartColors::for_store(&store);
        let range = PayloadRange::new(0.0, 10000.0);
        let chart = scatter_chart(&store, &SiteFilter::parse("KSC"), range, &colors);
        assert_eq!(chart.title, "Payload vs. Outcome for site KSC");
        assert_eq!(chart.point_count(), 2);
    }

    #[test]
    fn inverted_range_scatter_is_empty() {
        let store = store();
        let colors = ChartColors::for_store(&store);
        let range = PayloadRange::new(9000.0, 100.0);
        let chart = scatter_chart(&store, &SiteFilter::All, range, &colors);
        assert!(chart.is_empty());
        assert_eq!(chart.point_count(), 0);
    }

    #[test]
    fn pipelines_are_idempotent() {
        let store = store();
        let colors = ChartColors::for_store(&store);
        let filter = SiteFilter::parse("CCAFS");
        let range = PayloadRange::new(1000.0, 6000.0);

        assert_eq!(
            summary_chart(&store, &filter, &colors),
            summary_chart(&store, &filter, &colors)
        );
        assert_eq!(
            scatter_chart(&store, &filter, range, &colors),
            scatter_chart(&store, &filter, range, &colors)
        );
    }
}
