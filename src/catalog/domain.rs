use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for degree programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DegreeId(pub u32);

/// Identifier wrapper for colleges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollegeId(pub u32);

impl fmt::Display for DegreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CollegeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Degree program as advertised in the catalog.
///
/// `eligibility_criteria` is prose; the evaluator infers stream and percentage
/// requirements from it unless `minimum_percentage` is supplied explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeRecord {
    pub id: DegreeId,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "eligibility")]
    pub eligibility_criteria: Vec<String>,
    #[serde(default)]
    pub careers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_percentage: Option<u32>,
}

/// College listing with the set of degree programs it offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollegeRecord {
    pub id: CollegeId,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub fees: String,
    #[serde(default, alias = "degrees_offered")]
    pub degree_ids: Vec<DegreeId>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub college_code: Option<String>,
    #[serde(default)]
    pub specialization: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl CollegeRecord {
    pub fn offers(&self, degree: DegreeId) -> bool {
        self.degree_ids.contains(&degree)
    }
}

/// Published KCET closing rank for one college/degree pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KcetCutoff {
    pub college_id: CollegeId,
    pub degree_id: DegreeId,
    pub category: String,
    pub year: u16,
    pub cutoff_rank: u32,
}

/// Where a loaded catalog came from, surfaced in API responses and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    File,
    Builtin,
}

impl CatalogSource {
    pub const fn label(self) -> &'static str {
        match self {
            CatalogSource::File => "file",
            CatalogSource::Builtin => "builtin",
        }
    }
}
