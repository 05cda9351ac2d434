#![allow(dead_code)]

//! Result shapes for the document-processing pipeline: classification plus
//! the per-type feature structures.
//!
//! `ResumeFeatures` fields all carry serde defaults: a resume rarely states
//! every field, and an omitted optional field parses to its empty value
//! rather than failing the whole extraction.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The document categories the classifier may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocType {
    Resume,
    CoverLetter,
    Unknown,
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DocType::Resume => "RESUME",
            DocType::CoverLetter => "COVER_LETTER",
            DocType::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

/// Reply shape of the classification call.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocClassification {
    /// The type of document that was classified (RESUME, COVER_LETTER, or UNKNOWN).
    pub doc_type: DocType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// The email address of the candidate.
    #[serde(default)]
    pub email: String,
    /// The phone number of the candidate.
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    /// The degree obtained by the candidate.
    #[serde(default)]
    pub degree: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperienceEntry {
    /// The name of the company where the candidate worked.
    #[serde(default)]
    pub company_name: String,
    /// The position held by the candidate.
    #[serde(default)]
    pub position: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenSourceProject {
    /// The name of the open source project the candidate contributed to.
    #[serde(default)]
    pub project_name: String,
    /// The GitHub link to the open source project.
    #[serde(default)]
    pub github_link: String,
}

/// The fixed field set extracted from a resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeFeatures {
    /// The first name of the candidate.
    #[serde(default)]
    pub first_name: String,
    /// The last name of the candidate.
    #[serde(default)]
    pub last_name: String,
    /// Contact information of the candidate.
    #[serde(default)]
    pub contact: Contact,
    /// The education details of the candidate.
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    /// The number of years of experience the candidate has.
    #[serde(default)]
    pub years_of_experience: f32,
    /// The skills possessed by the candidate.
    #[serde(default)]
    pub skills: Vec<String>,
    /// The work experience of the candidate.
    #[serde(default)]
    pub work_experience: Vec<WorkExperienceEntry>,
    /// The salary expectation of the candidate.
    #[serde(default)]
    pub salary_expectation: f32,
    /// The location of the candidate.
    #[serde(default)]
    pub location: String,
    /// The open source projects the candidate has contributed to.
    #[serde(default)]
    pub open_source_projects: Vec<OpenSourceProject>,
}

/// Cover letters carry no extractable fields yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CoverLetterFeatures {}

/// The classification outcome paired with the features extracted for it.
///
/// The classification tag selects the variant; each variant can serialize
/// itself to a field-name→value mapping for uniform reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentFeatures {
    Resume(ResumeFeatures),
    CoverLetter(CoverLetterFeatures),
    Unknown,
}

impl DocumentFeatures {
    pub fn doc_type(&self) -> DocType {
        match self {
            DocumentFeatures::Resume(_) => DocType::Resume,
            DocumentFeatures::CoverLetter(_) => DocType::CoverLetter,
            DocumentFeatures::Unknown => DocType::Unknown,
        }
    }

    /// Flattens the active variant into a field-name→value mapping,
    /// preserving field declaration order.
    pub fn fields(&self) -> Map<String, Value> {
        match self {
            DocumentFeatures::Resume(features) => to_field_map(features),
            DocumentFeatures::CoverLetter(features) => to_field_map(features),
            DocumentFeatures::Unknown => Map::new(),
        }
    }
}

fn to_field_map<T: Serialize>(features: &T) -> Map<String, Value> {
    match serde_json::to_value(features) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
