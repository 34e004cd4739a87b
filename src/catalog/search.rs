use super::domain::{CollegeRecord, DegreeId, DegreeRecord};
use super::Catalog;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Rank assigned to unranked colleges when sorting by rank.
const UNRANKED: u32 = 999;

/// Free-text and category filters for degree listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DegreeQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Filters and ordering for college listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollegeQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub affiliation: Option<String>,
    #[serde(default)]
    pub sort: CollegeSort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollegeSort {
    #[default]
    Rank,
    Rating,
    Name,
}

/// Degrees sharing one category, in catalog order.
#[derive(Debug, Clone, Serialize)]
pub struct DegreeGroup<'a> {
    pub category: &'a str,
    pub degrees: Vec<&'a DegreeRecord>,
}

/// Distinct values the college listing can be filtered on.
#[derive(Debug, Clone, Serialize)]
pub struct CollegeFilters {
    pub locations: Vec<String>,
    pub affiliations: Vec<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

impl Catalog {
    pub fn search_degrees(&self, query: &DegreeQuery) -> Vec<&DegreeRecord> {
        let term = non_blank(&query.search).map(str::to_lowercase);
        let category = non_blank(&query.category);

        self.degrees()
            .iter()
            .filter(|degree| {
                term.as_deref().map_or(true, |term| {
                    contains_ignore_case(&degree.name, term)
                        || contains_ignore_case(&degree.description, term)
                })
            })
            .filter(|degree| category.map_or(true, |category| degree.category == category))
            .collect()
    }

    pub fn degrees_in_category(&self, category: &str) -> Vec<&DegreeRecord> {
        self.degrees()
            .iter()
            .filter(|degree| degree.category.eq_ignore_ascii_case(category))
            .collect()
    }

    /// Groups degrees by category, categories ordered by first appearance.
    pub fn degrees_by_category(&self) -> Vec<DegreeGroup<'_>> {
        let mut groups: Vec<DegreeGroup<'_>> = Vec::new();
        for degree in self.degrees() {
            match groups
                .iter_mut()
                .find(|group| group.category == degree.category)
            {
                Some(group) => group.degrees.push(degree),
                None => groups.push(DegreeGroup {
                    category: &degree.category,
                    degrees: vec![degree],
                }),
            }
        }
        groups
    }

    pub fn degree_categories(&self) -> Vec<&str> {
        self.degrees_by_category()
            .into_iter()
            .map(|group| group.category)
            .collect()
    }

    pub fn search_colleges(&self, query: &CollegeQuery) -> Vec<&CollegeRecord> {
        let term = non_blank(&query.search).map(str::to_lowercase);
        let location = non_blank(&query.location);
        let affiliation = non_blank(&query.affiliation);

        let mut colleges: Vec<&CollegeRecord> = self
            .colleges()
            .iter()
            .filter(|college| {
                term.as_deref().map_or(true, |term| {
                    contains_ignore_case(&college.name, term)
                        || contains_ignore_case(&college.description, term)
                })
            })
            .filter(|college| location.map_or(true, |location| college.location == location))
            .filter(|college| {
                affiliation.map_or(true, |affiliation| {
                    college.affiliation.as_deref() == Some(affiliation)
                })
            })
            .collect();

        sort_colleges(&mut colleges, query.sort);
        colleges
    }

    pub fn colleges_offering(&self, degree: DegreeId) -> Vec<&CollegeRecord> {
        self.colleges()
            .iter()
            .filter(|college| college.offers(degree))
            .collect()
    }

    pub fn featured_colleges(&self) -> Vec<&CollegeRecord> {
        self.colleges()
            .iter()
            .filter(|college| college.is_featured)
            .collect()
    }

    /// Ranked colleges only, best rank first.
    pub fn top_ranked_colleges(&self, limit: usize) -> Vec<&CollegeRecord> {
        let mut ranked: Vec<&CollegeRecord> = self
            .colleges()
            .iter()
            .filter(|college| college.rank.is_some())
            .collect();
        ranked.sort_by_key(|college| college.rank);
        ranked.truncate(limit);
        ranked
    }

    pub fn college_filters(&self) -> CollegeFilters {
        let mut locations: Vec<String> = Vec::new();
        let mut affiliations: Vec<String> = Vec::new();

        for college in self.colleges() {
            if !locations.contains(&college.location) {
                locations.push(college.location.clone());
            }
            if let Some(affiliation) = &college.affiliation {
                if !affiliations.contains(affiliation) {
                    affiliations.push(affiliation.clone());
                }
            }
        }

        locations.sort();
        affiliations.sort();
        CollegeFilters {
            locations,
            affiliations,
        }
    }
}

fn sort_colleges(colleges: &mut [&CollegeRecord], sort: CollegeSort) {
    match sort {
        CollegeSort::Rank => {
            colleges.sort_by_key(|college| college.rank.unwrap_or(UNRANKED));
        }
        CollegeSort::Rating => colleges.sort_by(|left, right| {
            right
                .rating
                .partial_cmp(&left.rating)
                .unwrap_or(Ordering::Equal)
        }),
        CollegeSort::Name => colleges.sort_by(|left, right| left.name.cmp(&right.name)),
    }
}
