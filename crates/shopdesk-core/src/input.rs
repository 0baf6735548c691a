//! Loading catalog data that was exported from the backend.
//!
//! Files ending in `.yaml`/`.yml` are read with `serde_yaml`; everything else
//! is treated as JSON.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::category::CategoryRecord;
use crate::error::CatalogError;
use crate::variant::AttributeSelection;

/// A category listing either as a bare array or wrapped in a list page.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CategoryListing {
    Bare(Vec<CategoryRecord>),
    Page { data: Vec<CategoryRecord> },
}

impl From<CategoryListing> for Vec<CategoryRecord> {
    fn from(listing: CategoryListing) -> Self {
        match listing {
            CategoryListing::Bare(records) | CategoryListing::Page { data: records } => records,
        }
    }
}

/// Load a flat category list.
///
/// Accepts a bare array of records or a page object with a `data` array;
/// any other page fields are ignored.
///
/// # Errors
///
/// Returns [`CatalogError::InputIo`] if the file cannot be read and
/// [`CatalogError::InputParse`] if it is not a category listing.
pub fn load_categories(path: &Path) -> Result<Vec<CategoryRecord>, CatalogError> {
    let listing: CategoryListing = load(path)?;
    Ok(listing.into())
}

/// Load an attribute selection: an object mapping attribute keys to lists of
/// selected value tokens. Key order in the file is kept.
///
/// # Errors
///
/// Returns [`CatalogError::InputIo`] if the file cannot be read and
/// [`CatalogError::InputParse`] if it is not a selection object.
pub fn load_selection(path: &Path) -> Result<AttributeSelection, CatalogError> {
    load(path)
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::InputIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let parse_error = |reason: String| CatalogError::InputParse {
        path: path.display().to_string(),
        reason,
    };

    if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))
    } else {
        serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("failed to write temp file");
        file
    }

    #[test]
    fn loads_bare_category_array() {
        let file = write_temp(
            ".json",
            r#"[{"id":1,"parentId":null,"name":"Skincare","slug":"skincare"},
                {"id":2,"parentId":1,"name":"Serums","slug":"serums"}]"#,
        );
        let records = load_categories(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].parent_id, Some(1));
    }

    #[test]
    fn loads_paged_category_listing() {
        let file = write_temp(
            ".json",
            r#"{"data":[{"id":3,"name":"Fragrance"}],"meta":{"page":1,"total":1}}"#,
        );
        let records = load_categories(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Fragrance");
    }

    #[test]
    fn loads_yaml_categories() {
        let file = write_temp(
            ".yaml",
            "- id: 1\n  name: Skincare\n- id: 2\n  parent_id: 1\n  name: Serums\n",
        );
        let records = load_categories(file.path()).unwrap();
        assert_eq!(records[1].parent_id, Some(1));
    }

    #[test]
    fn loads_yaml_selection_in_file_order() {
        let file = write_temp(".yml", "size: [50ml, 100ml]\ncolor: [red]\n");
        let selection = load_selection(file.path()).unwrap();
        let keys: Vec<&str> = selection.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["size", "color"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_categories(Path::new("/nonexistent/categories.json"));
        assert!(matches!(result, Err(CatalogError::InputIo { .. })));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let file = write_temp(".json", r#"{"rows": 3}"#);
        let err = load_categories(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::InputParse { .. }));
        assert!(err.to_string().contains("failed to parse"));
    }
}
