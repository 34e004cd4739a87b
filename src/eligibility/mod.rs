//! Matches a student's PUC stream and percentage against the catalog.

mod category;
mod criteria;
pub mod kcet;

pub use category::DegreeCategory;
pub use criteria::{required_percentage, scan_minimum};
pub use kcet::{KcetError, KcetMatch, KcetProgram, KcetQuery, KCET_CATEGORIES};

use crate::catalog::{Catalog, CollegeRecord, DegreeId, DegreeRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// PUC stream a student completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stream {
    #[default]
    Science,
    #[serde(alias = "science_bio")]
    ScienceBio,
    Commerce,
    Arts,
}

impl Stream {
    pub const ALL: [Stream; 4] = [
        Stream::Science,
        Stream::ScienceBio,
        Stream::Commerce,
        Stream::Arts,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Stream::Science => "science",
            Stream::ScienceBio => "scienceBio",
            Stream::Commerce => "commerce",
            Stream::Arts => "arts",
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stream {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['_', '-'], "");
        Stream::ALL
            .into_iter()
            .find(|stream| stream.as_str().to_ascii_lowercase() == normalized)
            .ok_or_else(|| {
                format!("unknown stream '{value}' (expected science, scienceBio, commerce or arts)")
            })
    }
}

/// Academic profile submitted for a single evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub stream: Stream,
    pub percentage: f64,
    #[serde(default, alias = "preferredLocation")]
    pub preferred_location: Option<String>,
}

/// Requirements the evaluator derived for one degree, for display alongside results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DegreeRequirement {
    pub degree_id: DegreeId,
    pub category: DegreeCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_stream: Option<Stream>,
    pub minimum_percentage: u32,
}

/// Degrees and colleges a profile qualifies for, both in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityReport<'a> {
    pub eligible_degrees: Vec<&'a DegreeRecord>,
    pub eligible_colleges: Vec<&'a CollegeRecord>,
}

/// Stateless evaluator. Every operation is a pure function of its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityEvaluator;

impl EligibilityEvaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn requirement(&self, degree: &DegreeRecord) -> DegreeRequirement {
        let category = DegreeCategory::classify(&degree.category);
        DegreeRequirement {
            degree_id: degree.id,
            category,
            required_stream: category.required_stream(),
            minimum_percentage: required_percentage(degree),
        }
    }

    pub fn is_eligible(&self, degree: &DegreeRecord, profile: &StudentProfile) -> bool {
        let category = DegreeCategory::classify(&degree.category);
        if !category.admits(profile.stream, &degree.eligibility_criteria) {
            return false;
        }

        profile.percentage >= f64::from(required_percentage(degree))
    }

    pub fn filter_eligible_degrees<'a>(
        &self,
        degrees: &'a [DegreeRecord],
        profile: &StudentProfile,
    ) -> Vec<&'a DegreeRecord> {
        degrees
            .iter()
            .filter(|degree| self.is_eligible(degree, profile))
            .collect()
    }

    /// Colleges offering at least one eligible degree, optionally narrowed to locations
    /// containing `preferred_location` (case-insensitive). A blank location does not filter.
    pub fn filter_eligible_colleges<'a>(
        &self,
        colleges: &'a [CollegeRecord],
        eligible_degree_ids: &HashSet<DegreeId>,
        preferred_location: Option<&str>,
    ) -> Vec<&'a CollegeRecord> {
        let location = preferred_location
            .filter(|location| !location.is_empty())
            .map(str::to_lowercase);

        colleges
            .iter()
            .filter(|college| {
                college
                    .degree_ids
                    .iter()
                    .any(|id| eligible_degree_ids.contains(id))
            })
            .filter(|college| {
                location.as_deref().map_or(true, |location| {
                    college.location.to_lowercase().contains(location)
                })
            })
            .collect()
    }

    pub fn evaluate<'a>(
        &self,
        catalog: &'a Catalog,
        profile: &StudentProfile,
    ) -> EligibilityReport<'a> {
        let eligible_degrees = self.filter_eligible_degrees(catalog.degrees(), profile);
        let eligible_ids: HashSet<DegreeId> =
            eligible_degrees.iter().map(|degree| degree.id).collect();
        let eligible_colleges = self.filter_eligible_colleges(
            catalog.colleges(),
            &eligible_ids,
            profile.preferred_location.as_deref(),
        );

        EligibilityReport {
            eligible_degrees,
            eligible_colleges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CollegeId;

    fn degree(id: u32, category: &str, criteria: &[&str]) -> DegreeRecord {
        DegreeRecord {
            id: DegreeId(id),
            name: format!("Degree {id}"),
            category: category.to_string(),
            duration: String::new(),
            description: String::new(),
            eligibility_criteria: criteria.iter().map(|value| value.to_string()).collect(),
            careers: Vec::new(),
            minimum_percentage: None,
        }
    }

    fn college(id: u32, degree_ids: &[u32], location: &str) -> CollegeRecord {
        CollegeRecord {
            id: CollegeId(id),
            name: format!("College {id}"),
            location: location.to_string(),
            description: String::new(),
            rating: 0.0,
            fees: String::new(),
            degree_ids: degree_ids.iter().copied().map(DegreeId).collect(),
            is_featured: false,
            college_code: None,
            specialization: Vec::new(),
            rank: None,
            affiliation: None,
            features: Vec::new(),
        }
    }

    fn profile(stream: Stream, percentage: f64) -> StudentProfile {
        StudentProfile {
            stream,
            percentage,
            preferred_location: None,
        }
    }

    fn computer_science() -> DegreeRecord {
        degree(
            1,
            "Engineering & Technology",
            &[
                "PUC with Mathematics as a core subject",
                "Minimum 60% aggregate in PUC",
            ],
        )
    }

    #[test]
    fn engineering_example_follows_stream_and_percentage() {
        let evaluator = EligibilityEvaluator::new();
        let degree = computer_science();

        assert!(evaluator.is_eligible(&degree, &profile(Stream::Science, 65.0)));
        assert!(!evaluator.is_eligible(&degree, &profile(Stream::Science, 55.0)));
        assert!(!evaluator.is_eligible(&degree, &profile(Stream::Commerce, 90.0)));
    }

    #[test]
    fn threshold_is_inclusive() {
        let evaluator = EligibilityEvaluator::new();
        let degree = degree(2, "Science", &["Minimum 60% aggregate in PUC"]);

        assert!(!evaluator.is_eligible(&degree, &profile(Stream::Arts, 59.0)));
        assert!(evaluator.is_eligible(&degree, &profile(Stream::Arts, 60.0)));
    }

    #[test]
    fn unreachable_minimum_rejects_even_a_perfect_score() {
        let evaluator = EligibilityEvaluator::new();
        let degree = degree(
            40,
            "Arts & Humanities",
            &["Minimum 5000000000% aggregate"],
        );

        assert!(!evaluator.is_eligible(&degree, &profile(Stream::Arts, 100.0)));
    }

    #[test]
    fn empty_criteria_only_apply_the_category_rule() {
        let evaluator = EligibilityEvaluator::new();
        let open = degree(3, "Arts & Humanities", &[]);
        let medicine = degree(4, "Medical & Health Sciences", &[]);

        assert!(evaluator.is_eligible(&open, &profile(Stream::Commerce, 0.0)));
        assert!(evaluator.is_eligible(&medicine, &profile(Stream::ScienceBio, 0.0)));
        assert!(!evaluator.is_eligible(&medicine, &profile(Stream::Science, 100.0)));
    }

    #[test]
    fn location_filter_is_case_insensitive_substring() {
        let evaluator = EligibilityEvaluator::new();
        let colleges = vec![college(10, &[1, 2], "Bangalore, Karnataka")];
        let eligible: HashSet<DegreeId> = [DegreeId(1)].into_iter().collect();

        let included = evaluator.filter_eligible_colleges(&colleges, &eligible, Some("bangalore"));
        assert_eq!(included.len(), 1);
        assert_eq!(included[0].id, CollegeId(10));

        let excluded = evaluator.filter_eligible_colleges(&colleges, &eligible, Some("delhi"));
        assert!(excluded.is_empty());

        let unfiltered = evaluator.filter_eligible_colleges(&colleges, &eligible, Some(""));
        assert_eq!(unfiltered.len(), 1);
    }

    #[test]
    fn colleges_without_eligible_degrees_are_dropped() {
        let evaluator = EligibilityEvaluator::new();
        let colleges = vec![
            college(1, &[3], "Mysore"),
            college(2, &[1, 99], "Mysore"),
            college(3, &[], "Mysore"),
        ];
        let eligible: HashSet<DegreeId> = [DegreeId(1)].into_iter().collect();

        let ids: Vec<CollegeId> = evaluator
            .filter_eligible_colleges(&colleges, &eligible, None)
            .iter()
            .map(|college| college.id)
            .collect();
        assert_eq!(ids, vec![CollegeId(2)]);
    }

    #[test]
    fn degree_filter_preserves_catalog_order() {
        let evaluator = EligibilityEvaluator::new();
        let degrees = vec![
            degree(5, "Science", &["Minimum 55% aggregate in PUC"]),
            computer_science(),
            degree(8, "Arts & Humanities", &["Minimum 50% aggregate in PUC"]),
        ];

        let ids: Vec<DegreeId> = evaluator
            .filter_eligible_degrees(&degrees, &profile(Stream::Science, 58.0))
            .iter()
            .map(|degree| degree.id)
            .collect();
        assert_eq!(ids, vec![DegreeId(5), DegreeId(8)]);
    }

    #[test]
    fn requirement_reports_derived_rule() {
        let requirement = EligibilityEvaluator::new().requirement(&computer_science());
        assert_eq!(requirement.category, DegreeCategory::EngineeringTechnology);
        assert_eq!(requirement.required_stream, Some(Stream::Science));
        assert_eq!(requirement.minimum_percentage, 60);
    }

    #[test]
    fn streams_parse_from_labels() {
        assert_eq!("scienceBio".parse::<Stream>(), Ok(Stream::ScienceBio));
        assert_eq!("science_bio".parse::<Stream>(), Ok(Stream::ScienceBio));
        assert_eq!(" Commerce ".parse::<Stream>(), Ok(Stream::Commerce));
        assert!("engineering".parse::<Stream>().is_err());
    }

    #[test]
    fn profiles_deserialize_from_form_payloads() {
        let profile: StudentProfile = serde_json::from_str(
            r#"{"stream":"scienceBio","percentage":72.5,"preferredLocation":"Bangalore"}"#,
        )
        .expect("profile parses");
        assert_eq!(profile.stream, Stream::ScienceBio);
        assert_eq!(profile.preferred_location.as_deref(), Some("Bangalore"));
    }
}
