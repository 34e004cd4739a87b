use super::Stream;
use serde::Serialize;

/// Degree categories that carry a hard stream prerequisite.
///
/// Catalog records keep their free-text category; this enum is derived from it with a
/// case-insensitive comparison so the stream rule lives in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeCategory {
    EngineeringTechnology,
    MedicalHealthSciences,
    CommerceFinance,
    Other,
}

impl DegreeCategory {
    pub fn classify(category: &str) -> Self {
        match category.to_lowercase().as_str() {
            "engineering & technology" => Self::EngineeringTechnology,
            "medical & health sciences" => Self::MedicalHealthSciences,
            "commerce & finance" => Self::CommerceFinance,
            _ => Self::Other,
        }
    }

    /// Stream that always satisfies the category rule, if the category has one.
    pub const fn required_stream(self) -> Option<Stream> {
        match self {
            Self::EngineeringTechnology => Some(Stream::Science),
            Self::MedicalHealthSciences => Some(Stream::ScienceBio),
            Self::CommerceFinance => Some(Stream::Commerce),
            Self::Other => None,
        }
    }

    /// Commerce programs also admit a stream that one of their criteria names.
    pub fn admits<S: AsRef<str>>(self, stream: Stream, criteria: &[S]) -> bool {
        match self {
            Self::EngineeringTechnology | Self::MedicalHealthSciences => {
                self.required_stream() == Some(stream)
            }
            Self::CommerceFinance => {
                if stream == Stream::Commerce {
                    return true;
                }
                let name = stream.as_str().to_lowercase();
                criteria
                    .iter()
                    .any(|criterion| criterion.as_ref().to_lowercase().contains(&name))
            }
            Self::Other => true,
        }
    }
}
