//! Client-side ordering of the issuer table.
//!
//! Sorting only reorders the page that is currently loaded; the server
//! decides which records land on a page.

use std::cmp::Ordering;
use std::str::FromStr;

use shareholding_api::types::Issuer;

/// Column the issuer table is ordered by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Display name, falling back to the EDINET code.
    Name,
    /// Latest holding ratio.
    Ratio,
    /// Latest filing date.
    #[default]
    Date,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "ratio" => Ok(SortKey::Ratio),
            "date" => Ok(SortKey::Date),
            other => Err(format!(
                "unknown sort key '{}'. Valid keys: name, ratio, date",
                other
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Active sort of the issuer table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IssuerSort {
    pub key: SortKey,
    pub order: SortOrder,
}

impl IssuerSort {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    /// Header click: the active column flips its order, another column
    /// becomes active in descending order.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.order = match self.order {
                SortOrder::Asc => SortOrder::Desc,
                SortOrder::Desc => SortOrder::Asc,
            };
        } else {
            self.key = key;
            self.order = SortOrder::Desc;
        }
    }

    /// Sorts in place. Stable; rows missing the sort value always go last.
    pub fn apply(&self, issuers: &mut [Issuer]) {
        issuers.sort_by(|a, b| self.compare(a, b));
    }

    fn compare(&self, a: &Issuer, b: &Issuer) -> Ordering {
        match self.key {
            SortKey::Name => {
                directed(Some(a.display_name()), Some(b.display_name()), self.order)
            }
            SortKey::Ratio => directed(
                a.latest_ratio.map(TotalF64),
                b.latest_ratio.map(TotalF64),
                self.order,
            ),
            SortKey::Date => directed(
                a.latest_filing_date.as_deref(),
                b.latest_filing_date.as_deref(),
                self.order,
            ),
        }
    }
}

fn directed<K: Ord>(a: Option<K>, b: Option<K>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match order {
            SortOrder::Asc => a.cmp(&b),
            SortOrder::Desc => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[derive(PartialEq)]
struct TotalF64(f64);

impl Eq for TotalF64 {}

impl PartialOrd for TotalF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TotalF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer(id: i64, name: Option<&str>, ratio: Option<f64>, date: Option<&str>) -> Issuer {
        Issuer {
            id,
            edinet_code: format!("E{:05}", id),
            name: name.map(str::to_string),
            sec_code: None,
            latest_filing_date: date.map(str::to_string),
            latest_ratio: ratio,
            latest_purpose: None,
            ratio_change: None,
            filing_count: Some(1),
        }
    }

    fn ids(issuers: &[Issuer]) -> Vec<i64> {
        issuers.iter().map(|i| i.id).collect()
    }

    fn sample() -> Vec<Issuer> {
        vec![
            issuer(1, Some("B社"), Some(5.5), Some("2024-01-10T00:00:00")),
            issuer(2, None, None, None),
            issuer(3, Some("A社"), Some(12.0), Some("2024-03-01T00:00:00")),
            issuer(4, Some("C社"), Some(7.25), Some("2023-12-31T00:00:00")),
        ]
    }

    #[test]
    fn ratio_desc_puts_missing_last() {
        let mut rows = sample();
        IssuerSort::new(SortKey::Ratio, SortOrder::Desc).apply(&mut rows);
        assert_eq!(ids(&rows), vec![3, 4, 1, 2]);
    }

    #[test]
    fn ratio_asc_still_puts_missing_last() {
        let mut rows = sample();
        IssuerSort::new(SortKey::Ratio, SortOrder::Asc).apply(&mut rows);
        assert_eq!(ids(&rows), vec![1, 4, 3, 2]);
    }

    #[test]
    fn date_sort() {
        let mut rows = sample();
        IssuerSort::default().apply(&mut rows);
        assert_eq!(ids(&rows), vec![3, 1, 4, 2]);
    }

    #[test]
    fn name_sort_falls_back_to_code() {
        let mut rows = sample();
        IssuerSort::new(SortKey::Name, SortOrder::Asc).apply(&mut rows);
        // the unnamed issuer is ordered by its code "E00002"
        assert_eq!(ids(&rows), vec![3, 1, 4, 2]);
    }

    #[test]
    fn toggle_flips_or_switches() {
        let mut sort = IssuerSort::default();
        sort.toggle(SortKey::Date);
        assert_eq!(sort, IssuerSort::new(SortKey::Date, SortOrder::Asc));
        sort.toggle(SortKey::Ratio);
        assert_eq!(sort, IssuerSort::new(SortKey::Ratio, SortOrder::Desc));
        sort.toggle(SortKey::Ratio);
        assert_eq!(sort.order, SortOrder::Asc);
    }

    #[test]
    fn parse_sort_key() {
        assert_eq!("Ratio".parse::<SortKey>(), Ok(SortKey::Ratio));
        assert!("volume".parse::<SortKey>().is_err());
    }
}
