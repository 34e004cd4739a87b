use super::domain::{CollegeId, CollegeRecord, DegreeId, DegreeRecord, KcetCutoff};
use super::CatalogError;
use serde::{Deserialize, Deserializer};
use std::io::Read;

const LIST_SEPARATOR: char = '|';

pub(crate) fn parse_degrees<R: Read>(reader: R) -> Result<Vec<DegreeRecord>, CatalogError> {
    let mut csv_reader = csv_reader(reader);
    let mut degrees = Vec::new();

    for record in csv_reader.deserialize::<DegreeRow>() {
        let row = record?;
        degrees.push(DegreeRecord {
            id: DegreeId(row.id),
            name: row.name,
            category: row.category,
            duration: row.duration.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
            eligibility_criteria: split_list(row.eligibility_criteria.as_deref()),
            careers: split_list(row.careers.as_deref()),
            minimum_percentage: row.minimum_percentage,
        });
    }

    Ok(degrees)
}

pub(crate) fn parse_colleges<R: Read>(reader: R) -> Result<Vec<CollegeRecord>, CatalogError> {
    let mut csv_reader = csv_reader(reader);
    let mut colleges = Vec::new();

    for record in csv_reader.deserialize::<CollegeRow>() {
        let row = record?;
        let degree_ids = split_list(row.degree_ids.as_deref())
            .into_iter()
            .map(|raw| {
                raw.parse::<u32>()
                    .map(DegreeId)
                    .map_err(|_| CatalogError::InvalidField {
                        record: format!("college {}", row.id),
                        field: "degree_ids",
                        value: raw.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let is_featured = parse_flag(row.is_featured.as_deref()).ok_or_else(|| {
            CatalogError::InvalidField {
                record: format!("college {}", row.id),
                field: "is_featured",
                value: row.is_featured.clone().unwrap_or_default(),
            }
        })?;

        colleges.push(CollegeRecord {
            id: CollegeId(row.id),
            name: row.name,
            location: row.location,
            description: row.description.unwrap_or_default(),
            rating: row.rating.unwrap_or_default(),
            fees: row.fees.unwrap_or_default(),
            degree_ids,
            is_featured,
            college_code: row.college_code,
            specialization: split_list(row.specialization.as_deref()),
            rank: row.rank,
            affiliation: row.affiliation,
            features: split_list(row.features.as_deref()),
        });
    }

    Ok(colleges)
}

pub(crate) fn parse_cutoffs<R: Read>(reader: R) -> Result<Vec<KcetCutoff>, CatalogError> {
    let mut csv_reader = csv_reader(reader);
    let mut cutoffs = Vec::new();

    for record in csv_reader.deserialize::<CutoffRow>() {
        let row = record?;
        cutoffs.push(KcetCutoff {
            college_id: CollegeId(row.college_id),
            degree_id: DegreeId(row.degree_id),
            category: row.category,
            year: row.year,
            cutoff_rank: row.cutoff_rank,
        });
    }

    Ok(cutoffs)
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

#[derive(Debug, Deserialize)]
struct DegreeRow {
    id: u32,
    name: String,
    category: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    duration: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    eligibility_criteria: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    careers: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none_u32")]
    minimum_percentage: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct CollegeRow {
    id: u32,
    name: String,
    location: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none_f32")]
    rating: Option<f32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    fees: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    degree_ids: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_featured: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    college_code: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    specialization: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none_u32")]
    rank: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    affiliation: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    features: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CutoffRow {
    college_id: u32,
    degree_id: u32,
    category: String,
    year: u16,
    cutoff_rank: u32,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn empty_string_as_none_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    empty_string_as_none(deserializer)?
        .map(|value| value.trim().parse::<u32>().map_err(serde::de::Error::custom))
        .transpose()
}

fn empty_string_as_none_f32<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    empty_string_as_none(deserializer)?
        .map(|value| value.trim().parse::<f32>().map_err(serde::de::Error::custom))
        .transpose()
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|raw| {
            raw.split(LIST_SEPARATOR)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_flag(value: Option<&str>) -> Option<bool> {
    match value.map(|raw| raw.trim().to_ascii_lowercase()) {
        None => Some(false),
        Some(raw) => match raw.as_str() {
            "true" | "yes" | "y" | "1" => Some(true),
            "false" | "no" | "n" | "0" => Some(false),
            _ => None,
        },
    }
}
