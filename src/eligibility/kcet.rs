use crate::catalog::{Catalog, CollegeId, CollegeRecord, DegreeId};
use serde::{Deserialize, Serialize};

/// Reservation categories KCET publishes closing ranks for.
pub const KCET_CATEGORIES: [&str; 8] = ["General", "SC", "ST", "OBC", "2A", "2B", "3A", "3B"];
pub const DEFAULT_KCET_CATEGORY: &str = "General";
pub const DEFAULT_KCET_YEAR: u16 = 2024;

fn default_category() -> String {
    DEFAULT_KCET_CATEGORY.to_string()
}

fn default_year() -> u16 {
    DEFAULT_KCET_YEAR
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KcetQuery {
    pub rank: u32,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_year")]
    pub year: u16,
}

impl KcetQuery {
    pub fn new(rank: u32) -> Self {
        Self {
            rank,
            category: default_category(),
            year: DEFAULT_KCET_YEAR,
        }
    }

    /// Canonical spelling of the requested category.
    pub fn canonical_category(&self) -> Result<&'static str, KcetError> {
        let requested = self.category.trim();
        KCET_CATEGORIES
            .into_iter()
            .find(|category| category.eq_ignore_ascii_case(requested))
            .ok_or_else(|| KcetError::UnknownCategory(self.category.clone()))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KcetError {
    #[error("KCET rank must be at least 1")]
    InvalidRank,
    #[error("unknown KCET category '{0}', expected one of General, SC, ST, OBC, 2A, 2B, 3A, 3B")]
    UnknownCategory(String),
}

/// One degree at a college whose closing rank admits the student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KcetProgram {
    pub degree_id: DegreeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree_name: Option<String>,
    pub cutoff_rank: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KcetMatch<'a> {
    pub college: &'a CollegeRecord,
    pub programs: Vec<KcetProgram>,
}

/// Colleges with at least one program whose closing rank is at or beyond `query.rank`,
/// in catalog order.
///
/// Lower ranks are better, so a program admits the student when
/// `cutoff_rank >= rank`. A cutoff below the student's rank closed before reaching
/// them and is excluded, even though it is numerically "within" the rank.
pub fn colleges_for_rank<'a>(
    catalog: &'a Catalog,
    query: &KcetQuery,
) -> Result<Vec<KcetMatch<'a>>, KcetError> {
    if query.rank == 0 {
        return Err(KcetError::InvalidRank);
    }
    let category = query.canonical_category()?;

    let admitted: Vec<_> = catalog
        .kcet_cutoffs()
        .iter()
        .filter(|cutoff| cutoff.year == query.year)
        .filter(|cutoff| cutoff.category.trim().eq_ignore_ascii_case(category))
        .filter(|cutoff| cutoff.cutoff_rank >= query.rank)
        .collect();

    let matches = catalog
        .colleges()
        .iter()
        .filter_map(|college| {
            let mut programs: Vec<KcetProgram> = admitted
                .iter()
                .filter(|cutoff| cutoff.college_id == college.id)
                .map(|cutoff| KcetProgram {
                    degree_id: cutoff.degree_id,
                    degree_name: catalog
                        .degree(cutoff.degree_id)
                        .map(|degree| degree.name.clone()),
                    cutoff_rank: cutoff.cutoff_rank,
                })
                .collect();
            if programs.is_empty() {
                return None;
            }
            programs.sort_by_key(|program| program.cutoff_rank);
            Some(KcetMatch { college, programs })
        })
        .collect();

    Ok(matches)
}

/// Ids of the colleges returned by [`colleges_for_rank`].
pub fn college_ids(matches: &[KcetMatch<'_>]) -> Vec<CollegeId> {
    matches.iter().map(|found| found.college.id).collect()
}
