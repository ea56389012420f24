//! CSV transcript import.
//!
//! Expected header: `course_code,course_name,units,grade,semester`. Only
//! `course_code` and `units` must be present on every row; the other columns
//! may be blank or omitted entirely.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::eligibility::CompletedCourse;

#[derive(Debug, thiserror::Error)]
pub enum TranscriptImportError {
    #[error("failed to read transcript: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid transcript CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("transcript row {line} has no course code")]
    MissingCourseCode { line: u64 },
    #[error("transcript row {line} has non-numeric units '{value}'")]
    InvalidUnits { line: u64, value: String },
    #[error("transcript row {line} has negative units ({value})")]
    NegativeUnits { line: u64, value: f64 },
}

pub struct TranscriptImporter;

impl TranscriptImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<CompletedCourse>, TranscriptImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<CompletedCourse>, TranscriptImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut courses = Vec::new();

        for (index, record) in csv_reader.deserialize::<TranscriptRow>().enumerate() {
            // Header occupies line 1.
            let line = index as u64 + 2;
            let row = record?;
            courses.push(row.into_course(line)?);
        }

        Ok(courses)
    }

    pub fn from_csv_str(raw: &str) -> Result<Vec<CompletedCourse>, TranscriptImportError> {
        Self::from_reader(raw.as_bytes())
    }
}

#[derive(Debug, Deserialize)]
struct TranscriptRow {
    #[serde(default)]
    course_code: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    course_name: Option<String>,
    #[serde(default)]
    units: String,
    #[serde(default)]
    grade: String,
    #[serde(default)]
    semester: String,
}

impl TranscriptRow {
    fn into_course(self, line: u64) -> Result<CompletedCourse, TranscriptImportError> {
        if self.course_code.is_empty() {
            return Err(TranscriptImportError::MissingCourseCode { line });
        }

        let units = match self.units.parse::<f64>() {
            Ok(units) if units.is_finite() => units,
            _ => {
                return Err(TranscriptImportError::InvalidUnits {
                    line,
                    value: self.units,
                })
            }
        };
        if units < 0.0 {
            return Err(TranscriptImportError::NegativeUnits { line, value: units });
        }

        Ok(CompletedCourse {
            course_code: self.course_code,
            course_name: self.course_name,
            units,
            grade: self.grade,
            semester: self.semester,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
