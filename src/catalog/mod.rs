//! Degree, college and KCET cutoff catalog.
//!
//! A [`Catalog`] is materialized once (from a JSON document, a directory of CSV
//! exports, or the embedded dataset) and never mutated afterwards. Consumers share
//! it behind an `Arc`.

pub mod domain;
mod parser;
pub mod search;

pub use domain::{CatalogSource, CollegeId, CollegeRecord, DegreeId, DegreeRecord, KcetCutoff};

use crate::config::CatalogConfig;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

const DEGREES_CSV: &str = "degrees.csv";
const COLLEGES_CSV: &str = "colleges.csv";
const CUTOFFS_CSV: &str = "kcet_cutoffs.csv";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog source: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid value '{value}' for {field} on {record}")]
    InvalidField {
        record: String,
        field: &'static str,
        value: String,
    },
    #[error("degree id {0} appears more than once")]
    DuplicateDegree(DegreeId),
    #[error("college id {0} appears more than once")]
    DuplicateCollege(CollegeId),
    #[error("unsupported catalog path {0}: expected a .json file or a CSV directory")]
    UnsupportedSource(PathBuf),
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    degrees: Vec<DegreeRecord>,
    colleges: Vec<CollegeRecord>,
    #[serde(default)]
    kcet_cutoffs: Vec<KcetCutoff>,
}

/// Immutable in-memory catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    degrees: Vec<DegreeRecord>,
    colleges: Vec<CollegeRecord>,
    kcet_cutoffs: Vec<KcetCutoff>,
    source: CatalogSource,
}

impl Catalog {
    pub fn new(
        degrees: Vec<DegreeRecord>,
        colleges: Vec<CollegeRecord>,
        kcet_cutoffs: Vec<KcetCutoff>,
        source: CatalogSource,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            degrees,
            colleges,
            kcet_cutoffs,
            source,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Dataset compiled into the binary, used whenever no other source is usable.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_reader(BUILTIN_CATALOG.as_bytes(), CatalogSource::Builtin)
    }

    pub fn from_json_reader<R: Read>(
        reader: R,
        source: CatalogSource,
    ) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_reader(reader)?;
        Self::new(
            document.degrees,
            document.colleges,
            document.kcet_cutoffs,
            source,
        )
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file), CatalogSource::File)
    }

    /// Reads `degrees.csv`, `colleges.csv` and, when present, `kcet_cutoffs.csv`.
    pub fn from_csv_dir<P: AsRef<Path>>(dir: P) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let degrees = parser::parse_degrees(File::open(dir.join(DEGREES_CSV))?)?;
        let colleges = parser::parse_colleges(File::open(dir.join(COLLEGES_CSV))?)?;
        let cutoffs_path = dir.join(CUTOFFS_CSV);
        let kcet_cutoffs = if cutoffs_path.exists() {
            parser::parse_cutoffs(File::open(cutoffs_path)?)?
        } else {
            Vec::new()
        };
        Self::new(degrees, colleges, kcet_cutoffs, CatalogSource::File)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        if path.is_dir() {
            return Self::from_csv_dir(path);
        }

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            Self::from_json_path(path)
        } else {
            Err(CatalogError::UnsupportedSource(path.to_path_buf()))
        }
    }

    /// Loads the configured source, or the built-in dataset when none is configured or
    /// the configured one cannot be read. Only a broken built-in dataset is an error.
    pub fn load_or_fallback(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let Some(path) = config.path.as_deref() else {
            info!("no catalog path configured, using built-in catalog");
            return Self::builtin();
        };

        match Self::from_path(path) {
            Ok(catalog) => {
                info!(
                    path = %path.display(),
                    degrees = catalog.degrees.len(),
                    colleges = catalog.colleges.len(),
                    cutoffs = catalog.kcet_cutoffs.len(),
                    "catalog loaded"
                );
                Ok(catalog)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to load catalog, using built-in catalog instead");
                Self::builtin()
            }
        }
    }

    pub fn degrees(&self) -> &[DegreeRecord] {
        &self.degrees
    }

    pub fn colleges(&self) -> &[CollegeRecord] {
        &self.colleges
    }

    pub fn kcet_cutoffs(&self) -> &[KcetCutoff] {
        &self.kcet_cutoffs
    }

    pub fn source(&self) -> CatalogSource {
        self.source
    }

    pub fn degree(&self, id: DegreeId) -> Option<&DegreeRecord> {
        self.degrees.iter().find(|degree| degree.id == id)
    }

    pub fn college(&self, id: CollegeId) -> Option<&CollegeRecord> {
        self.colleges.iter().find(|college| college.id == id)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut degree_ids = HashSet::new();
        for degree in &self.degrees {
            if !degree_ids.insert(degree.id) {
                return Err(CatalogError::DuplicateDegree(degree.id));
            }
        }

        let mut college_ids = HashSet::new();
        for college in &self.colleges {
            if !college_ids.insert(college.id) {
                return Err(CatalogError::DuplicateCollege(college.id));
            }
            // Dangling references are tolerated; they never match an eligible degree.
            for degree in college
                .degree_ids
                .iter()
                .filter(|id| !degree_ids.contains(*id))
            {
                debug!(college = %college.id, degree = %degree, "college references unknown degree");
            }
        }

        Ok(())
    }
}
