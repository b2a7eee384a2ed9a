//! Calendar date parsing and legacy marker resolution.

use chrono::{NaiveDate, NaiveTime};
use fda_model::options::DEFAULT_LEGACY_MARKER;

/// Outcome of resolving one source date cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateResolution {
    /// A concrete calendar date.
    Resolved(NaiveDate),
    /// A legacy marker mapped to its sentinel date.
    Historic(NaiveDate),
    /// Empty cell.
    Absent,
    /// Non-empty text that is neither a date nor a known marker.
    Unparseable,
}

impl DateResolution {
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            DateResolution::Resolved(date) | DateResolution::Historic(date) => Some(date),
            DateResolution::Absent | DateResolution::Unparseable => None,
        }
    }

    pub fn is_historic(self) -> bool {
        matches!(self, DateResolution::Historic(_))
    }

    pub fn is_unparseable(self) -> bool {
        matches!(self, DateResolution::Unparseable)
    }
}

/// Cutoff the publisher's legacy marker stands for.
pub fn legacy_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(1982, 1, 1).unwrap_or_default()
}

/// Marker text to sentinel date.
///
/// Markers match on the trimmed cell text exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyDateTable {
    entries: Vec<(String, NaiveDate)>,
}

impl Default for LegacyDateTable {
    fn default() -> Self {
        Self {
            entries: vec![(DEFAULT_LEGACY_MARKER.to_string(), legacy_cutoff())],
        }
    }
}

impl LegacyDateTable {
    /// Table whose single marker is `marker`, mapped to the 1982 cutoff.
    pub fn with_marker(marker: impl Into<String>) -> Self {
        Self {
            entries: vec![(marker.into().trim().to_string(), legacy_cutoff())],
        }
    }

    /// Adds or replaces a marker.
    pub fn insert(&mut self, marker: impl Into<String>, date: NaiveDate) {
        let marker = marker.into().trim().to_string();
        match self.entries.iter_mut().find(|(known, _)| *known == marker) {
            Some(entry) => entry.1 = date,
            None => self.entries.push((marker, date)),
        }
    }

    pub fn lookup(&self, value: &str) -> Option<NaiveDate> {
        let trimmed = value.trim();
        self.entries
            .iter()
            .find(|(marker, _)| marker == trimmed)
            .map(|(_, date)| *date)
    }

    pub fn markers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(marker, _)| marker.as_str())
    }

    pub fn resolve(&self, value: &str) -> DateResolution {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return DateResolution::Absent;
        }
        if let Some(date) = self.lookup(trimmed) {
            return DateResolution::Historic(date);
        }
        match parse_iso_date(trimmed) {
            Some(date) => DateResolution::Resolved(date),
            None => DateResolution::Unparseable,
        }
    }
}

/// Resolves one cell against a single marker.
///
/// Returns `(date, is_historic)`. Unparseable and empty input both yield
/// `(None, false)`.
///
/// ```
/// use chrono::NaiveDate;
/// use fda_transform::resolve_date;
///
/// let cutoff = NaiveDate::from_ymd_opt(1982, 1, 1).unwrap();
/// let marker = "Approved prior to Jan 1, 1982";
/// assert_eq!(resolve_date(marker, marker, cutoff), (Some(cutoff), true));
/// assert_eq!(
///     resolve_date("2005-06-15", marker, cutoff),
///     (NaiveDate::from_ymd_opt(2005, 6, 15), false)
/// );
/// assert_eq!(resolve_date("06/15/2005", marker, cutoff), (None, false));
/// ```
pub fn resolve_date(
    value: &str,
    legacy_marker: &str,
    legacy_value: NaiveDate,
) -> (Option<NaiveDate>, bool) {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed == legacy_marker.trim() {
        return (Some(legacy_value), true);
    }
    (parse_iso_date(trimmed), false)
}

/// Strict `YYYY-MM-DD`, optionally followed by a time after a space or `T`.
///
/// The time part must itself parse; it is then discarded.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let date_part = trimmed.get(..10)?;
    if !has_date_shape(date_part) {
        return None;
    }
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
    let rest = &trimmed[10..];
    if rest.is_empty() {
        return Some(date);
    }
    let time = rest.strip_prefix(' ').or_else(|| rest.strip_prefix('T'))?;
    is_time(time.trim()).then_some(date)
}

fn has_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, byte)| match idx {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

fn is_time(value: &str) -> bool {
    ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"]
        .iter()
        .any(|format| NaiveTime::parse_from_str(value, format).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn legacy_marker_is_historic() {
        let table = LegacyDateTable::default();
        assert_eq!(
            table.resolve("  Approved prior to Jan 1, 1982 "),
            DateResolution::Historic(ymd(1982, 1, 1))
        );
    }

    #[test]
    fn concrete_dates_resolve() {
        let table = LegacyDateTable::default();
        assert_eq!(
            table.resolve("2005-06-15"),
            DateResolution::Resolved(ymd(2005, 6, 15))
        );
        assert_eq!(
            table.resolve("2005-06-15 00:00:00"),
            DateResolution::Resolved(ymd(2005, 6, 15))
        );
        assert_eq!(
            table.resolve("2005-06-15T13:45:00.000"),
            DateResolution::Resolved(ymd(2005, 6, 15))
        );
    }

    #[test]
    fn empty_and_garbage_are_distinguished() {
        let table = LegacyDateTable::default();
        assert_eq!(table.resolve(""), DateResolution::Absent);
        assert_eq!(table.resolve("not a date"), DateResolution::Unparseable);
        assert_eq!(table.resolve("2005-02-30"), DateResolution::Unparseable);
        assert_eq!(table.resolve("2005-6-15"), DateResolution::Unparseable);
        assert_eq!(table.resolve("2005-06-15 noon"), DateResolution::Unparseable);
    }

    #[test]
    fn configured_marker_replaces_default() {
        let table = LegacyDateTable::with_marker("Pre-1982");
        assert_eq!(table.lookup("Pre-1982"), Some(ymd(1982, 1, 1)));
        assert_eq!(table.lookup(DEFAULT_LEGACY_MARKER), None);
        assert_eq!(table.markers().count(), 1);
    }

    #[test]
    fn insert_replaces_existing_marker() {
        let mut table = LegacyDateTable::default();
        table.insert(DEFAULT_LEGACY_MARKER, ymd(1981, 12, 31));
        table.insert("Unknown approval", ymd(1970, 1, 1));
        assert_eq!(table.lookup(DEFAULT_LEGACY_MARKER), Some(ymd(1981, 12, 31)));
        assert_eq!(table.markers().count(), 2);
    }

    #[test]
    fn multibyte_input_does_not_panic() {
        assert_eq!(parse_iso_date("2005-06-1\u{e9}"), None);
        assert_eq!(parse_iso_date("\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}"), None);
    }
}
