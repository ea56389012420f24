use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::debug;

use super::{
    normalize_code, EquivalencyEntry, ReferenceCatalog, ReferenceDataError, ReferenceDocument,
};

const BUNDLED_REFERENCE: &str = include_str!("../../data/reference.json");

/// Assembles a [`ReferenceCatalog`] from a JSON document plus optional
/// equivalency CSV exports.
#[derive(Debug, Default)]
pub struct ReferenceLoader {
    document: ReferenceDocument,
}

impl ReferenceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, ReferenceDataError> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(file)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, ReferenceDataError> {
        let document = serde_json::from_reader(reader)?;
        Ok(Self { document })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ReferenceDataError> {
        let document = serde_json::from_str(raw)?;
        Ok(Self { document })
    }

    pub fn with_equivalency_csv_path<P: AsRef<Path>>(
        self,
        path: P,
    ) -> Result<Self, ReferenceDataError> {
        let file = std::fs::File::open(path)?;
        self.with_equivalency_csv(file)
    }

    /// Merge rows shaped `college,course_code,uc_course,igetc_areas,source_url`.
    ///
    /// Areas are separated by `;` or whitespace. Only `college` and
    /// `course_code` are mandatory.
    pub fn with_equivalency_csv<R: Read>(
        mut self,
        reader: R,
    ) -> Result<Self, ReferenceDataError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut merged = 0usize;
        for (index, row) in csv_reader.deserialize::<EquivalencyRow>().enumerate() {
            let row = row?;
            // header occupies line 1
            let line = index as u64 + 2;
            if row.college.is_empty() {
                return Err(ReferenceDataError::IncompleteEquivalencyRow {
                    line,
                    field: "college",
                });
            }
            if row.course_code.is_empty() {
                return Err(ReferenceDataError::IncompleteEquivalencyRow {
                    line,
                    field: "course_code",
                });
            }

            let entry = EquivalencyEntry {
                uc_course: row.uc_course,
                igetc_areas: split_areas(row.igetc_areas.as_deref()),
                source_url: row.source_url,
            };

            let code = normalize_code(&row.course_code);
            let table = self.document.equivalencies.entry(row.college).or_default();
            match table.get_mut(&code) {
                Some(existing) => existing.merge(entry),
                None => {
                    table.insert(code, entry);
                }
            }
            merged += 1;
        }

        debug!(rows = merged, "merged equivalency rows from CSV");
        Ok(self)
    }

    pub fn build(self) -> Result<ReferenceCatalog, ReferenceDataError> {
        let catalog = ReferenceCatalog::from_document(self.document)?;
        debug!(
            majors = catalog.majors.len(),
            colleges = catalog.colleges.len(),
            "reference catalog loaded"
        );
        Ok(catalog)
    }

    /// Start from the demo dataset compiled into the crate.
    pub fn bundled() -> Result<Self, ReferenceDataError> {
        Self::from_json_str(BUNDLED_REFERENCE)
    }
}

#[derive(Debug, Deserialize)]
struct EquivalencyRow {
    college: String,
    course_code: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    uc_course: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    igetc_areas: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    source_url: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn split_areas(raw: Option<&str>) -> BTreeSet<String> {
    raw.map(|value| {
        value
            .split(|c: char| c == ';' || c.is_whitespace())
            .map(str::trim)
            .filter(|area| !area.is_empty())
            .map(str::to_uppercase)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceDataProvider;
    use std::io::Cursor;

    const MINIMAL_JSON: &str = r#"{
        "majors": {
            "Biology": {
                "required_courses": [
                    {"name": "General Chemistry", "equivalent_codes": ["CHEM 1A"]}
                ],
                "igetc_areas": {"5B": {"name": "Biological Science"}}
            }
        }
    }"#;

    #[test]
    fn bundled_catalog_loads() {
        let catalog = ReferenceCatalog::bundled().expect("bundled data is valid");
        assert!(catalog.major_requirements("Computer Science").is_some());
        assert!(catalog.equivalencies("De Anza College").is_some());
    }

    #[test]
    fn csv_rows_extend_equivalencies() {
        let csv = "college,course_code,uc_course,igetc_areas,source_url\n\
                   Ohlone College,BIOL 101A,BIOL 20A,5B;5C,\n\
                   Ohlone College,biol 101a,,5B,https://assist.org\n";

        let catalog = ReferenceLoader::from_json_str(MINIMAL_JSON)
            .expect("json parses")
            .with_equivalency_csv(Cursor::new(csv))
            .expect("csv parses")
            .build()
            .expect("catalog builds");

        let entry = catalog
            .equivalencies("Ohlone College")
            .and_then(|table| table.lookup("BIOL 101A"))
            .expect("entry present");
        assert_eq!(entry.uc_course.as_deref(), Some("BIOL 20A"));
        assert_eq!(entry.source_url.as_deref(), Some("https://assist.org"));
        assert!(entry.igetc_areas.contains("5B"));
        assert!(entry.igetc_areas.contains("5C"));
    }

    #[test]
    fn csv_rows_require_a_college() {
        let csv = "college,course_code,uc_course,igetc_areas,source_url\n\
                   ,MATH 1A,MATH 19A,2,\n";

        match ReferenceLoader::new().with_equivalency_csv(Cursor::new(csv)) {
            Err(ReferenceDataError::IncompleteEquivalencyRow { line, field }) => {
                assert_eq!(line, 2);
                assert_eq!(field, "college");
            }
            other => panic!("expected incomplete row error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            ReferenceLoader::from_json_str("{\"majors\": ["),
            Err(ReferenceDataError::Json(_))
        ));
    }

    #[test]
    fn area_lists_accept_semicolons_and_spaces() {
        let areas = split_areas(Some("1a; 2  5C"));
        assert_eq!(
            areas.into_iter().collect::<Vec<_>>(),
            vec!["1A".to_string(), "2".to_string(), "5C".to_string()]
        );
    }
}
