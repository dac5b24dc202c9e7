use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::workflows::selection::CriterionRow;

/// Raw applicant snapshot row. Attribute cells stay strings here: an empty
/// or unparseable cell becomes a missing attribute for the scoring policy to
/// handle, not a batch-level parse failure.
#[derive(Debug, Deserialize)]
pub(crate) struct ApplicantCsvRow {
    #[serde(default)]
    pub(crate) id: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) validation_status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) household_income: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) class_rank: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) dependents_count: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) house_area: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) average_grade: Option<String>,
}

pub(crate) fn parse_applicant_rows<R: Read>(
    reader: R,
) -> Result<Vec<ApplicantCsvRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    csv_reader.deserialize::<ApplicantCsvRow>().collect()
}

pub(crate) fn parse_criterion_rows<R: Read>(reader: R) -> Result<Vec<CriterionRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    csv_reader.deserialize::<CriterionRow>().collect()
}

pub(crate) fn numeric_cell(cell: Option<&str>) -> Option<f64> {
    cell.and_then(|value| value.trim().parse::<f64>().ok())
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
