//! OperationResult - structured output of a filesystem operation

use serde::Serialize;

use super::error::EntryKind;

/// Summary sentence plus kind-specific data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationResult {
    pub summary: String,
    pub data: ResultData,
}

impl OperationResult {
    pub fn new(summary: impl Into<String>, data: ResultData) -> Self {
        Self {
            summary: summary.into(),
            data,
        }
    }

    pub fn kind(&self) -> ResultKind {
        self.data.kind()
    }
}

/// Which operation produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultKind {
    Listing,
    Content,
    Metadata,
    SearchMatches,
    Tree,
    DiskUsage,
    LargeFiles,
    ExtensionCounts,
}

/// Kind-specific fields; serializes as a flat map of field name to value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultData {
    Listing {
        path: String,
        count: usize,
        entries: Vec<String>,
    },
    Content {
        path: String,
        size_bytes: u64,
        is_text: bool,
        content: Option<String>,
    },
    Metadata {
        path: String,
        #[serde(rename = "type")]
        kind: EntryKind,
        size_bytes: u64,
        modified: String,
        created: String,
        absolute_path: String,
    },
    SearchMatches {
        base_path: String,
        pattern: String,
        matches: Vec<String>,
    },
    Tree {
        path: String,
        max_depth: usize,
        tree: Vec<String>,
    },
    DiskUsage {
        path: String,
        size_bytes: u64,
        size_mb: f64,
        file_count: u64,
        dir_count: u64,
    },
    LargeFiles {
        path: String,
        min_size_mb: f64,
        limit: usize,
        files: Vec<LargeFile>,
    },
    ExtensionCounts {
        path: String,
        /// `(extension, count)` pairs, most common first
        counts: Vec<(String, u64)>,
    },
}

impl ResultData {
    pub fn kind(&self) -> ResultKind {
        match self {
            Self::Listing { .. } => ResultKind::Listing,
            Self::Content { .. } => ResultKind::Content,
            Self::Metadata { .. } => ResultKind::Metadata,
            Self::SearchMatches { .. } => ResultKind::SearchMatches,
            Self::Tree { .. } => ResultKind::Tree,
            Self::DiskUsage { .. } => ResultKind::DiskUsage,
            Self::LargeFiles { .. } => ResultKind::LargeFiles,
            Self::ExtensionCounts { .. } => ResultKind::ExtensionCounts,
        }
    }
}

/// One entry in a large-files ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LargeFile {
    pub path: String,
    pub size_bytes: u64,
    pub size_mb: f64,
}

/// Bytes to megabytes, rounded to two decimals
pub fn bytes_to_mb(bytes: u64) -> f64 {
    (bytes as f64 / 1024.0 / 1024.0 * 100.0).round() / 100.0
}

/// Render a float the way a decimal reader expects: whole values keep one decimal
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_serializes_fields_in_order() {
        let data = ResultData::Listing {
            path: ".".to_string(),
            count: 1,
            entries: vec!["a.txt".to_string()],
        };

        let value = serde_json::to_value(&data).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["path", "count", "entries"]);
    }

    #[test]
    fn test_metadata_kind_renamed_to_type() {
        let data = ResultData::Metadata {
            path: "a".to_string(),
            kind: EntryKind::File,
            size_bytes: 3,
            modified: "m".to_string(),
            created: "c".to_string(),
            absolute_path: "/r/a".to_string(),
        };

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["type"], "file");
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn test_extension_counts_serialize_as_pairs() {
        let data = ResultData::ExtensionCounts {
            path: ".".to_string(),
            counts: vec![(".txt".to_string(), 2)],
        };

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["counts"], serde_json::json!([[".txt", 2]]));
    }

    #[test]
    fn test_bytes_to_mb_rounds() {
        assert_eq!(bytes_to_mb(0), 0.0);
        assert_eq!(bytes_to_mb(1024 * 1024), 1.0);
        assert_eq!(bytes_to_mb(1_500_000), 1.43);
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(0.5), "0.5");
        assert_eq!(format_float(1.43), "1.43");
    }

    #[test]
    fn test_kind_tag() {
        let result = OperationResult::new(
            "s",
            ResultData::Tree {
                path: ".".to_string(),
                max_depth: 3,
                tree: vec![],
            },
        );
        assert_eq!(result.kind(), ResultKind::Tree);
        assert_eq!(serde_json::to_value(result.kind()).unwrap(), "tree");
    }
}
