//! CSV population loader.
//!
//! Expected header: `name,mother,father,trait`. Blank parent columns mean
//! "no parent"; the trait column is `1` (present), `0` (absent) or blank
//! (unknown).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use hd_common::TraitObservation;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::population::{Person, Population};

/// Errors raised while reading a population file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing column '{0}' in header")]
    MissingColumn(&'static str),

    #[error("row {row}: empty name")]
    EmptyName { row: usize },

    #[error("row {row}: invalid trait value '{value}' (expected 1, 0 or blank)")]
    InvalidTrait { row: usize, value: String },
}

impl From<LoadError> for hd_common::Error {
    fn from(err: LoadError) -> Self {
        hd_common::Error::Input(err.to_string())
    }
}

const REQUIRED_COLUMNS: [&str; 4] = ["name", "mother", "father", "trait"];

#[derive(Debug, Deserialize)]
struct Row {
    name: String,
    #[serde(default)]
    mother: String,
    #[serde(default)]
    father: String,
    #[serde(rename = "trait", default)]
    observation: String,
}

fn parse_observation(row: usize, value: &str) -> Result<TraitObservation, LoadError> {
    match value {
        "" => Ok(TraitObservation::Unknown),
        "1" => Ok(TraitObservation::Present),
        "0" => Ok(TraitObservation::Absent),
        other => Err(LoadError::InvalidTrait {
            row,
            value: other.to_string(),
        }),
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Read people from any CSV source. Rows are numbered from 1, excluding the header.
pub fn read_people<R: Read>(source: R) -> Result<Vec<Person>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let mut people = Vec::new();
    for (i, result) in reader.deserialize::<Row>().enumerate() {
        let row = i + 1;
        let record = result?;
        if record.name.is_empty() {
            return Err(LoadError::EmptyName { row });
        }
        let observation = parse_observation(row, &record.observation)?;
        people.push(Person {
            id: record.name.into(),
            mother: non_empty(record.mother).map(Into::into),
            father: non_empty(record.father).map(Into::into),
            observation,
        });
    }
    debug!(rows = people.len(), "population rows read");
    Ok(people)
}

/// Load and validate a population from a CSV file.
pub fn load_population(path: &Path) -> hd_common::Result<Population> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let people = read_people(file)?;
    Population::new(people)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hd_common::Error;
    use std::io::Write;

    const FAMILY: &str = "\
name,mother,father,trait
Harry,Lily,James,
James,,,1
Lily,,,0
";

    #[test]
    fn reads_family() {
        let people = read_people(FAMILY.as_bytes()).unwrap();
        assert_eq!(people.len(), 3);
        let harry = &people[0];
        assert_eq!(harry.id.as_str(), "Harry");
        assert_eq!(harry.mother.as_ref().map(|m| m.as_str()), Some("Lily"));
        assert_eq!(harry.father.as_ref().map(|f| f.as_str()), Some("James"));
        assert_eq!(harry.observation, TraitObservation::Unknown);
        assert_eq!(people[1].observation, TraitObservation::Present);
        assert_eq!(people[2].observation, TraitObservation::Absent);
        assert!(people[1].mother.is_none());
    }

    #[test]
    fn column_order_does_not_matter() {
        let csv = "trait,father,mother,name\n1,,,Solo\n";
        let people = read_people(csv.as_bytes()).unwrap();
        assert_eq!(people[0].id.as_str(), "Solo");
        assert_eq!(people[0].observation, TraitObservation::Present);
    }

    #[test]
    fn invalid_trait_names_row() {
        let csv = "name,mother,father,trait\nA,,,1\nB,,,yes\n";
        let err = read_people(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidTrait { row: 2, ref value } if value == "yes"));
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn missing_column_rejected() {
        let csv = "name,mother,father\nA,,\n";
        let err = read_people(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("trait")));
    }

    #[test]
    fn empty_name_rejected() {
        let csv = "name,mother,father,trait\n,,,1\n";
        assert!(matches!(
            read_people(csv.as_bytes()),
            Err(LoadError::EmptyName { row: 1 })
        ));
    }

    #[test]
    fn load_population_validates_structure() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "name,mother,father,trait\nKid,Mom,,\nMom,,,\n").unwrap();
        let err = load_population(file.path()).unwrap_err();
        assert!(matches!(err, Error::SingleParent { ref person } if person == "Kid"));
    }

    #[test]
    fn load_population_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FAMILY.as_bytes()).unwrap();
        let population = load_population(file.path()).unwrap();
        assert_eq!(population.len(), 3);
        assert_eq!(population.observed_count(), 2);
    }

    #[test]
    fn missing_file_is_input_error() {
        let err = load_population(Path::new("/nonexistent/family.csv")).unwrap_err();
        assert_eq!(err.code(), 20);
    }
}
