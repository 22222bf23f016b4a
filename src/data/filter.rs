use std::fmt;

use super::model::LaunchRecord;

// ---------------------------------------------------------------------------
// Site selection
// ---------------------------------------------------------------------------

/// Sentinel selector value meaning "every launch site".
pub const ALL_SITES: &str = "ALL";

/// Value of the launch-site selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SiteFilter {
    #[default]
    All,
    Site(String),
}

impl SiteFilter {
    /// Interpret a raw selector value; [`ALL_SITES`] maps to [`SiteFilter::All`].
    pub fn parse(value: &str) -> Self {
        if value == ALL_SITES {
            SiteFilter::All
        } else {
            SiteFilter::Site(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SiteFilter::All => ALL_SITES,
            SiteFilter::Site(site) => site,
        }
    }
}

impl fmt::Display for SiteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Inclusive payload mass interval chosen on the range selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Clamp both ends into `[min, max]` without reordering them, so an
    /// inverted selection stays inverted and filters to nothing.
    pub fn clamped(self, min: f64, max: f64) -> Self {
        Self {
            low: self.low.clamp(min, max),
            high: self.high.clamp(min, max),
        }
    }

    pub fn is_inverted(&self) -> bool {
        self.low > self.high
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Keep the records launched from the selected site, in input order.
/// An unknown site yields an empty result.
pub fn filter_by_site<'a, I>(records: I, site_filter: &SiteFilter) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    match site_filter {
        SiteFilter::All => records.into_iter().collect(),
        SiteFilter::Site(site) => records
            .into_iter()
            .filter(|rec| rec.site == *site)
            .collect(),
    }
}

/// Keep the records with `low <= payload_mass_kg <= high`, in input order.
/// An inverted range matches nothing.
pub fn filter_by_payload<'a, I>(records: I, low: f64, high: f64) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    records
        .into_iter()
        .filter(|rec| low <= rec.payload_mass_kg && rec.payload_mass_kg <= high)
        .collect()
}
