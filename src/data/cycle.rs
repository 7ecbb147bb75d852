//! Business-cycle reference dates.
//!
//! Peaks and troughs from the NBER chronology, monthly resolution, stored as
//! the first day of the month. Used to shade recessions on charts.

use chrono::NaiveDate;

/// One recession: business-cycle peak to the following trough.
pub type CycleSpan = (NaiveDate, NaiveDate);

pub trait CycleDateProvider {
    /// Ordered (peak, trough) pairs.
    fn cycle_dates(&self) -> Vec<CycleSpan>;
}

/// NBER US business-cycle peaks and troughs, (year, month) pairs.
const NBER_PEAKS_TROUGHS: [((i32, u32), (i32, u32)); 34] = [
    ((1857, 6), (1858, 12)),
    ((1860, 10), (1861, 6)),
    ((1865, 4), (1867, 12)),
    ((1869, 6), (1870, 12)),
    ((1873, 10), (1879, 3)),
    ((1882, 3), (1885, 5)),
    ((1887, 3), (1888, 4)),
    ((1890, 7), (1891, 5)),
    ((1893, 1), (1894, 6)),
    ((1895, 12), (1897, 6)),
    ((1899, 6), (1900, 12)),
    ((1902, 9), (1904, 8)),
    ((1907, 5), (1908, 6)),
    ((1910, 1), (1912, 1)),
    ((1913, 1), (1914, 12)),
    ((1918, 8), (1919, 3)),
    ((1920, 1), (1921, 7)),
    ((1923, 5), (1924, 7)),
    ((1926, 10), (1927, 11)),
    ((1929, 8), (1933, 3)),
    ((1937, 5), (1938, 6)),
    ((1945, 2), (1945, 10)),
    ((1948, 11), (1949, 10)),
    ((1953, 7), (1954, 5)),
    ((1957, 8), (1958, 4)),
    ((1960, 4), (1961, 2)),
    ((1969, 12), (1970, 11)),
    ((1973, 11), (1975, 3)),
    ((1980, 1), (1980, 7)),
    ((1981, 7), (1982, 11)),
    ((1990, 7), (1991, 3)),
    ((2001, 3), (2001, 11)),
    ((2007, 12), (2009, 6)),
    ((2020, 2), (2020, 4)),
];

/// Built-in NBER chronology.
#[derive(Debug, Clone, Copy, Default)]
pub struct NberCycleDates;

impl CycleDateProvider for NberCycleDates {
    fn cycle_dates(&self) -> Vec<CycleSpan> {
        NBER_PEAKS_TROUGHS
            .iter()
            .filter_map(|&((py, pm), (ty, tm))| {
                Some((NaiveDate::from_ymd_opt(py, pm, 1)?, NaiveDate::from_ymd_opt(ty, tm, 1)?))
            })
            .collect()
    }
}

/// Recessions overlapping `[start, end]`, clipped to that window.
///
/// A recession straddling `start` begins at `start`; one straddling `end`
/// ends at `end`.
pub fn recession_spans(dates: &[CycleSpan], start: NaiveDate, end: NaiveDate) -> Vec<CycleSpan> {
    dates
        .iter()
        .filter(|(peak, trough)| *peak <= end && *trough >= start)
        .map(|&(peak, trough)| (peak.max(start), trough.min(end)))
        .filter(|(a, b)| a <= b)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn table_is_ordered() {
        let dates = NberCycleDates.cycle_dates();
        assert_eq!(dates.len(), 34);
        for (peak, trough) in &dates {
            assert!(peak < trough);
        }
        for w in dates.windows(2) {
            assert!(w[0].1 < w[1].0);
        }
        assert_eq!(dates.last(), Some(&(d(2020, 2, 1), d(2020, 4, 1))));
    }

    #[test]
    fn clips_to_window() {
        let dates = NberCycleDates.cycle_dates();
        let spans = recession_spans(&dates, d(2008, 6, 1), d(2020, 3, 1));
        assert_eq!(spans, vec![(d(2008, 6, 1), d(2009, 6, 1)), (d(2020, 2, 1), d(2020, 3, 1))]);
    }

    #[test]
    fn window_between_recessions_is_empty() {
        let dates = NberCycleDates.cycle_dates();
        assert!(recession_spans(&dates, d(2010, 1, 1), d(2019, 12, 1)).is_empty());
    }
}
