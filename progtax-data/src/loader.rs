use std::fs::File;
use std::io::Read;
use std::path::Path;

use progtax_core::{Bracket, BracketTable, InvalidBracketTable};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading a bracket table.
#[derive(Debug, Error)]
pub enum BracketTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid bracket table: {0}")]
    InvalidTable(#[from] InvalidBracketTable),
}

impl From<csv::Error> for BracketTableLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a bracket CSV file.
///
/// - `upper_bound`: where the bracket ends (empty for the unbounded top bracket)
/// - `rate`: the marginal rate as a decimal (e.g., 0.075 for 7.5%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl From<&BracketRecord> for Bracket {
    fn from(record: &BracketRecord) -> Self {
        Bracket {
            upper_bound: record.upper_bound,
            rate: record.rate,
        }
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket tables stored as CSV.
///
/// Rows are taken in file order, so the file must list brackets from the
/// lowest bound upward with the unbounded bracket last.
pub struct BracketTableLoader;

impl BracketTableLoader {
    /// Parse bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or a
    /// string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketTableLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Turn parsed records into a validated [`BracketTable`].
    pub fn load(records: &[BracketRecord]) -> Result<BracketTable, BracketTableLoaderError> {
        let brackets = records.iter().map(Bracket::from).collect();
        Ok(BracketTable::new(brackets)?)
    }

    /// Read, parse and validate a bracket CSV file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<BracketTable, BracketTableLoaderError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| BracketTableLoaderError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let records = Self::parse(file)?;
        debug!(path = %path.display(), records = records.len(), "parsed bracket records");

        Self::load(&records)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = r#"upper_bound,rate
22847.76,0
33919.80,0.075
45012.60,0.15
55976.16,0.225
,0.275
"#;

    #[test]
    fn test_parse_csv_single_bracket() {
        let csv = "upper_bound,rate\n10000,0.10";

        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![BracketRecord {
                upper_bound: Some(dec!(10000)),
                rate: dec!(0.10),
            }]
        );
    }

    #[test]
    fn test_parse_csv_unbounded_top_bracket() {
        let records = BracketTableLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 5);
        assert_eq!(records[4].upper_bound, None);
        assert_eq!(records[4].rate, dec!(0.275));
    }

    #[test]
    fn test_parse_csv_trims_whitespace() {
        let csv = "upper_bound, rate\n 1000 , 0.05\n   , 0.2";

        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].upper_bound, Some(dec!(1000)));
        assert_eq!(records[1].upper_bound, None);
        assert_eq!(records[1].rate, dec!(0.2));
    }

    #[test]
    fn test_parse_invalid_csv_missing_column() {
        let csv = "upper_bound\n1000";

        let err = BracketTableLoader::parse(csv.as_bytes()).expect_err("Should fail for missing column");

        let BracketTableLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(msg.contains("missing field"), "Expected 'missing field' in error, got: {}", msg);
    }

    #[test]
    fn test_parse_invalid_csv_bad_decimal() {
        let csv = "upper_bound,rate\nabc,0.10";

        let err = BracketTableLoader::parse(csv.as_bytes()).expect_err("Should fail for invalid decimal");

        assert!(matches!(err, BracketTableLoaderError::CsvParse(_)));
    }

    #[test]
    fn test_parse_empty_csv() {
        let records = BracketTableLoader::parse("upper_bound,rate\n".as_bytes()).expect("Failed to parse CSV");

        assert!(records.is_empty());
    }

    #[test]
    fn test_load_builds_default_table() {
        let records = BracketTableLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        let table = BracketTableLoader::load(&records).expect("Failed to load table");

        assert_eq!(table, BracketTable::default());
    }

    #[test]
    fn test_load_rejects_empty_records() {
        let result = BracketTableLoader::load(&[]);

        assert!(matches!(
            result,
            Err(BracketTableLoaderError::InvalidTable(InvalidBracketTable::Empty))
        ));
    }

    #[test]
    fn test_load_rejects_bounded_top_bracket() {
        let records = BracketTableLoader::parse("upper_bound,rate\n1000,0\n2000,0.1".as_bytes())
            .expect("Failed to parse CSV");

        let result = BracketTableLoader::load(&records);

        assert!(matches!(
            result,
            Err(BracketTableLoaderError::InvalidTable(
                InvalidBracketTable::BoundedTopBracket(_)
            ))
        ));
    }
}
