//! Survey dataset model and delimited-text parsing.
//!
//! A [`Dataset`] is the single shared table every chart reads from. Values are
//! kept exactly as they appear in the payload; no type coercion or schema
//! validation happens at load time.

use super::error::Result;
use std::collections::HashMap;

/// One row of the survey table, keyed by column header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: HashMap<String, String>,
}

impl Record {
    /// Returns the raw value for `column`, if the row has one.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Number of populated columns in this row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, String)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Ordered survey records plus the header row they were parsed with.
///
/// Immutable once built. The cache hands it out as `Arc<Dataset>` so every
/// consumer shares the same instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Builds a dataset from already-split rows.
    #[must_use]
    pub fn new(headers: Vec<String>, records: Vec<Record>) -> Self {
        Self { headers, records }
    }

    /// Parses delimited text with a header row.
    ///
    /// Rows may be ragged: a short row only carries the columns it has, and
    /// trailing fields beyond the header are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::Parse`](super::SurveyError::Parse) if the
    /// payload is not readable as delimited text (e.g. invalid UTF-8).
    ///
    /// # Example
    ///
    /// ```rust
    /// use survey_lens::domain::Dataset;
    ///
    /// let dataset = Dataset::parse("gender,age\nFemale,34\nMale,29\n", b',')?;
    /// assert_eq!(dataset.len(), 2);
    /// assert_eq!(dataset.records()[0].get("age"), Some("34"));
    /// # Ok::<(), survey_lens::SurveyError>(())
    /// ```
    pub fn parse(payload: &str, delimiter: u8) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(payload.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let record = headers
                .iter()
                .zip(row.iter())
                .map(|(header, value)| (header.clone(), value.to_string()))
                .collect();
            records.push(record);
        }

        tracing::debug!(
            columns = headers.len(),
            rows = records.len(),
            "parsed dataset payload"
        );

        Ok(Self { headers, records })
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Raw values of one column in record order. Rows without the column are
    /// skipped.
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.records.iter().filter_map(move |record| record.get(name))
    }

    /// Counts each distinct non-blank value of a column.
    ///
    /// Entries are ordered by first appearance, which is the order bar charts
    /// render categories in.
    #[must_use]
    pub fn value_counts(&self, name: &str) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for value in self.column(name) {
            if value.trim().is_empty() {
                continue;
            }
            if let Some(&idx) = positions.get(value) {
                counts[idx].1 += 1;
            } else {
                positions.insert(value, counts.len());
                counts.push((value.to_string(), 1));
            }
        }

        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = "\
respondent,gender,housing
1,Female,Renting
2,Male,Owner occupied
3,Female,
4,Non-binary,Renting
";

    #[test]
    fn parse_keeps_raw_values() {
        let dataset = Dataset::parse(PAYLOAD, b',').unwrap();
        assert_eq!(dataset.headers(), &["respondent", "gender", "housing"]);
        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.records()[0].get("respondent"), Some("1"));
        assert_eq!(dataset.records()[2].get("housing"), Some(""));
    }

    #[test]
    fn parse_tolerates_ragged_rows() {
        let dataset = Dataset::parse("a,b,c\n1,2\n4,5,6,7\n", b',').unwrap();
        assert_eq!(dataset.records()[0].len(), 2);
        assert_eq!(dataset.records()[0].get("c"), None);
        assert_eq!(dataset.records()[1].get("c"), Some("6"));
    }

    #[test]
    fn parse_honours_delimiter() {
        let dataset = Dataset::parse("a;b\nx;y\n", b';').unwrap();
        assert_eq!(dataset.records()[0].get("b"), Some("y"));
    }

    #[test]
    fn value_counts_in_first_appearance_order() {
        let dataset = Dataset::parse(PAYLOAD, b',').unwrap();
        assert_eq!(
            dataset.value_counts("housing"),
            vec![("Renting".to_string(), 2), ("Owner occupied".to_string(), 1)]
        );
        assert_eq!(
            dataset.value_counts("gender"),
            vec![
                ("Female".to_string(), 2),
                ("Male".to_string(), 1),
                ("Non-binary".to_string(), 1)
            ]
        );
        assert!(dataset.value_counts("missing").is_empty());
    }
}
