//! Catalog ingestion.
//!
//! Turns positional catalog rows (HYG-like layout) into typed
//! [`CatalogRecord`]s. A row is kept only when its apparent magnitude, right
//! ascension and declination are present and numeric; every other field is
//! optional and stays absent if it cannot be read.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

/// Column positions in a catalog row.
pub mod columns {
    pub const ID: usize = 0;
    pub const NAME: usize = 6;
    pub const RIGHT_ASCENSION: usize = 7;
    pub const DECLINATION: usize = 8;
    pub const DISTANCE: usize = 9;
    pub const APPARENT_MAGNITUDE: usize = 13;
    pub const ABSOLUTE_MAGNITUDE: usize = 14;
    pub const SPECTRAL_CLASS: usize = 15;

    pub const MIN_FIELDS: usize = 16;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StarId(pub i64);

impl fmt::Display for StarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Positional access to the fields of one catalog row.
pub trait CatalogRow {
    fn field(&self, index: usize) -> Option<&str>;
}

impl CatalogRow for csv::StringRecord {
    fn field(&self, index: usize) -> Option<&str> {
        self.get(index)
    }
}

impl<S: AsRef<str>> CatalogRow for [S] {
    fn field(&self, index: usize) -> Option<&str> {
        self.get(index).map(AsRef::as_ref)
    }
}

impl<S: AsRef<str>> CatalogRow for Vec<S> {
    fn field(&self, index: usize) -> Option<&str> {
        self.as_slice().field(index)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RequiredField {
    ApparentMagnitude,
    RightAscension,
    Declination,
}

impl RequiredField {
    pub fn column(self) -> usize {
        match self {
            RequiredField::ApparentMagnitude => columns::APPARENT_MAGNITUDE,
            RequiredField::RightAscension => columns::RIGHT_ASCENSION,
            RequiredField::Declination => columns::DECLINATION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("{0} is missing")]
    Missing(RequiredField),
    #[error("{field} is not numeric: {value:?}")]
    NotNumeric { field: RequiredField, value: String },
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("malformed catalog row {row}")]
    MalformedRecord {
        row: usize,
        #[source]
        source: RecordError,
    },
    #[error("failed to open catalog {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read catalog CSV")]
    Csv(#[from] csv::Error),
}

/// One star as read from the catalog. Immutable after ingestion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: StarId,
    pub name: Option<String>,
    /// Hours, nominally [0, 24).
    pub right_ascension: f64,
    /// Degrees. Not used by the radial projection.
    pub declination: f64,
    pub apparent_magnitude: f64,
    pub absolute_magnitude: Option<f64>,
    /// Parsecs.
    pub distance: Option<f64>,
    pub spectral_class: Option<String>,
}

impl CatalogRecord {
    pub fn parse<R: CatalogRow + ?Sized>(row: &R) -> Result<Self, RecordError> {
        // presence is checked for every required field before numeric parsing
        let required = [
            RequiredField::ApparentMagnitude,
            RequiredField::RightAscension,
            RequiredField::Declination,
        ];
        for field in required {
            if non_empty(row.field(field.column())).is_none() {
                return Err(RecordError::Missing(field));
            }
        }

        let apparent_magnitude = required_number(row, RequiredField::ApparentMagnitude)?;
        let declination = required_number(row, RequiredField::Declination)?;
        let right_ascension = required_number(row, RequiredField::RightAscension)?;

        let id = non_empty(row.field(columns::ID))
            .and_then(|value| value.parse::<i64>().ok())
            .unwrap_or_default();

        Ok(Self {
            id: StarId(id),
            name: non_empty(row.field(columns::NAME)).map(str::to_string),
            right_ascension,
            declination,
            apparent_magnitude,
            absolute_magnitude: optional_number(row.field(columns::ABSOLUTE_MAGNITUDE)),
            distance: optional_number(row.field(columns::DISTANCE)).filter(|d| *d >= 0.0),
            spectral_class: non_empty(row.field(columns::SPECTRAL_CLASS)).map(str::to_string),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|number| number.is_finite())
}

fn optional_number(value: Option<&str>) -> Option<f64> {
    non_empty(value).and_then(parse_number)
}

fn required_number<R: CatalogRow + ?Sized>(
    row: &R,
    field: RequiredField,
) -> Result<f64, RecordError> {
    let value = non_empty(row.field(field.column())).ok_or(RecordError::Missing(field))?;
    parse_number(value).ok_or_else(|| RecordError::NotNumeric {
        field,
        value: value.to_string(),
    })
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// Log every dropped row at warn level instead of trace.
    pub warn_on_malformed: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub accepted: usize,
    pub skipped: usize,
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
    report: IngestReport,
}

impl Catalog {
    pub fn ingest<R, I>(rows: I, options: IngestOptions) -> Self
    where
        R: CatalogRow,
        I: IntoIterator<Item = R>,
    {
        let mut records = Vec::new();
        let mut report = IngestReport::default();

        for (row_index, row) in rows.into_iter().enumerate() {
            match CatalogRecord::parse(&row) {
                Ok(record) => {
                    records.push(record);
                    report.accepted += 1;
                }
                Err(source) => {
                    report.skipped += 1;
                    let error = CatalogError::MalformedRecord {
                        row: row_index,
                        source,
                    };
                    if options.warn_on_malformed {
                        warn!("{}: {}", error, error_source(&error));
                    } else {
                        trace!("{}: {}", error, error_source(&error));
                    }
                }
            }
        }

        info!(
            "Ingested {} catalog rows, skipped {} malformed",
            report.accepted, report.skipped
        );

        Self { records, report }
    }

    /// Reads a CSV catalog with a header row. Rows may have varying lengths.
    ///
    /// Fields are decoded lossily, so a stray non-UTF-8 byte only affects the
    /// field it sits in. Only a failure of the underlying reader is an error.
    pub fn from_csv_reader<T: Read>(reader: T, options: IngestOptions) -> Result<Self, CatalogError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in reader.byte_records() {
            rows.push(lossy_fields(&record?));
        }
        debug!("Read {} CSV rows", rows.len());

        Ok(Self::ingest(rows, options))
    }

    pub fn from_csv_path(path: &Path, options: IngestOptions) -> Result<Self, CatalogError> {
        info!("Loading star catalog from {:?}", path);

        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_csv_reader(file, options)
    }

    pub fn from_records(records: Vec<CatalogRecord>) -> Self {
        let report = IngestReport {
            accepted: records.len(),
            skipped: 0,
        };
        Self { records, report }
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn report(&self) -> IngestReport {
        self.report
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<CatalogRecord> {
        self.records
    }
}

fn lossy_fields(record: &csv::ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}

fn error_source(error: &CatalogError) -> String {
    std::error::Error::source(error)
        .map(|source| source.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[(usize, &str)]) -> Vec<String> {
        let mut row = vec![String::new(); columns::MIN_FIELDS];
        for (index, value) in fields {
            row[*index] = value.to_string();
        }
        row
    }

    fn sirius_row() -> Vec<String> {
        row(&[
            (columns::ID, "1"),
            (columns::NAME, "Sirius"),
            (columns::RIGHT_ASCENSION, "6.75"),
            (columns::DECLINATION, "-16.7"),
            (columns::DISTANCE, "2.64"),
            (columns::APPARENT_MAGNITUDE, "-1.46"),
            (columns::ABSOLUTE_MAGNITUDE, "1.42"),
            (columns::SPECTRAL_CLASS, "A1V"),
        ])
    }

    #[test]
    fn parses_complete_row() -> anyhow::Result<()> {
        let record = CatalogRecord::parse(&sirius_row())?;

        assert_eq!(record.id, StarId(1));
        assert_eq!(record.name.as_deref(), Some("Sirius"));
        assert_eq!(record.right_ascension, 6.75);
        assert_eq!(record.declination, -16.7);
        assert_eq!(record.apparent_magnitude, -1.46);
        assert_eq!(record.absolute_magnitude, Some(1.42));
        assert_eq!(record.distance, Some(2.64));
        assert_eq!(record.spectral_class.as_deref(), Some("A1V"));

        Ok(())
    }

    #[test]
    fn optional_fields_stay_absent() -> anyhow::Result<()> {
        let record = CatalogRecord::parse(&row(&[
            (columns::ID, "not-a-number"),
            (columns::RIGHT_ASCENSION, "1.0"),
            (columns::DECLINATION, "2.0"),
            (columns::APPARENT_MAGNITUDE, "3.0"),
            (columns::DISTANCE, "-5"),
            (columns::ABSOLUTE_MAGNITUDE, "bright"),
        ]))?;

        assert_eq!(record.id, StarId(0));
        assert!(record.name.is_none());
        assert!(record.spectral_class.is_none());
        assert!(record.absolute_magnitude.is_none());
        assert!(record.distance.is_none());

        Ok(())
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let mut fields = sirius_row();
        fields[columns::DECLINATION] = "  ".to_string();

        assert_eq!(
            CatalogRecord::parse(&fields),
            Err(RecordError::Missing(RequiredField::Declination))
        );
    }

    #[test]
    fn presence_is_checked_before_numeric_content() {
        let mut fields = sirius_row();
        fields[columns::APPARENT_MAGNITUDE] = "abc".to_string();
        fields[columns::RIGHT_ASCENSION] = String::new();

        assert_eq!(
            CatalogRecord::parse(&fields),
            Err(RecordError::Missing(RequiredField::RightAscension))
        );
    }

    #[test]
    fn non_numeric_required_field_is_rejected() {
        let mut fields = sirius_row();
        fields[columns::RIGHT_ASCENSION] = "6h45m".to_string();

        assert_eq!(
            CatalogRecord::parse(&fields),
            Err(RecordError::NotNumeric {
                field: RequiredField::RightAscension,
                value: "6h45m".to_string(),
            })
        );
    }

    #[test]
    fn short_rows_are_missing_fields() {
        let fields = vec!["1", "", "", "", "", "", "Sol", "0.0"];

        assert_eq!(
            CatalogRecord::parse(fields.as_slice()),
            Err(RecordError::Missing(RequiredField::ApparentMagnitude))
        );
    }

    #[test]
    fn ingest_counts_skipped_rows() {
        let mut broken = sirius_row();
        broken[columns::APPARENT_MAGNITUDE] = "NaN".to_string();

        let catalog = Catalog::ingest(
            vec![sirius_row(), broken, sirius_row()],
            IngestOptions {
                warn_on_malformed: true,
            },
        );

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.report(),
            IngestReport {
                accepted: 2,
                skipped: 1
            }
        );
    }

    #[test]
    fn reads_csv_with_header() -> anyhow::Result<()> {
        let csv = "\
id,hip,hd,hr,gl,bf,proper,ra,dec,dist,pmra,pmdec,rv,mag,absmag,spect
0,,,,,,Sol,0.0,0.0,0.0,,,,-26.7,4.85,G2V
1,32349,48915,2491,,9Alp CMa,Sirius,6.752481,-16.716116,2.6371,,,,-1.44,1.454,A0m
2,,,,,,,,,,,,,,,
3,,,,,,, 12.5 ,45.0,10.0,,,,5.5,
";
        let catalog = Catalog::from_csv_reader(csv.as_bytes(), IngestOptions::default())?;

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.report().skipped, 1);
        assert_eq!(catalog.records()[1].name.as_deref(), Some("Sirius"));
        assert_eq!(catalog.records()[2].right_ascension, 12.5);
        assert!(catalog.records()[2].spectral_class.is_none());

        Ok(())
    }

    #[test]
    fn invalid_utf8_only_affects_its_own_row() -> anyhow::Result<()> {
        let mut csv = b"id,hip,hd,hr,gl,bf,proper,ra,dec,dist,pmra,pmdec,rv,mag,absmag,spect\n".to_vec();
        csv.extend_from_slice(b"1,,,,,,Sirius,6.75,-16.7,2.64,,,,-1.46,1.42,A1V\n");
        csv.extend_from_slice(b"2,,,,,,Bad\xff\xfeName,1.0,2.0,3.0,,,,4.0,,K0\n");
        csv.extend_from_slice(b"3,,,,,,Broken,6.7\xff,2.0,3.0,,,,4.0,,K0\n");
        csv.extend_from_slice(b"4,,,,,,Vega,18.6,38.8,7.68,,,,0.03,0.6,A0V\n");

        let catalog = Catalog::from_csv_reader(csv.as_slice(), IngestOptions::default())?;

        let names: Vec<_> = catalog
            .records()
            .iter()
            .map(|record| record.name.clone().unwrap_or_default())
            .collect();
        assert_eq!(names, vec!["Sirius", "Bad\u{FFFD}\u{FFFD}Name", "Vega"]);
        assert_eq!(
            catalog.report(),
            IngestReport {
                accepted: 3,
                skipped: 1
            }
        );

        Ok(())
    }

    #[test]
    fn missing_file_reports_path() {
        let path = Path::new("does/not/exist.csv");
        let error = Catalog::from_csv_path(path, IngestOptions::default()).unwrap_err();

        assert!(matches!(error, CatalogError::Io { ref path, .. } if path.ends_with("exist.csv")));
    }
}
