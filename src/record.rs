use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::error::DataLoadError;

/// One crawled page as exported by the crawler's statistics endpoint.
///
/// `statistics` is kept as raw JSON so that a non-object value can be
/// reported by [`crate::metrics::extract`] instead of failing the whole load.
/// `None` means the key is absent; an explicit `null` is `Some(Value::Null)`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatRecord {
    #[serde(default)]
    pub url: String,

    #[serde(default, deserialize_with = "present")]
    pub statistics: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

pub fn load(path: &Path) -> Result<Vec<StatRecord>, DataLoadError> {
    let start_time = Instant::now();
    info!(action = "start", component = "stats_loading", file_path = ?path, "Loading crawl statistics");

    let content = fs::read_to_string(path).map_err(|source| DataLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse(&content).map_err(|source| DataLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let load_time = start_time.elapsed();
    info!(
        action = "complete",
        component = "stats_loading",
        record_count = records.len(),
        duration_ms = load_time.as_millis(),
        "Crawl statistics loaded"
    );
    Ok(records)
}

pub fn parse(content: &str) -> serde_json::Result<Vec<StatRecord>> {
    serde_json::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_keeps_document_order() {
        let records = parse(r#"[{"url":"b"},{"url":"a"},{"url":"c"}]"#).unwrap();
        let urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, ["b", "a", "c"]);
    }

    #[test]
    fn test_parse_optional_fields() {
        let records = parse(r#"[{}, {"url":"x","statistics":null}, {"statistics":5}]"#).unwrap();
        assert_eq!(records[0], StatRecord::default());
        assert_eq!(records[1].statistics, Some(Value::Null));
        assert_eq!(records[2].url, "");
        assert_eq!(records[2].statistics, Some(json!(5)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");

        let err = load(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::Read { .. }));
        assert!(err.to_string().contains("stats.json"));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[{{\"url\": ").unwrap();

        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::Parse { .. }));
    }

    #[test]
    fn test_load_rejects_non_array_document() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"url": "a"}}"#).unwrap();

        assert!(matches!(load(file.path()), Err(DataLoadError::Parse { .. })));
    }

    #[test]
    fn test_load_utf8_document() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"url":"https://пример.рф/","statistics":{{"urlsCount":2}}}}]"#
        )
        .unwrap();

        let records = load(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, "https://пример.рф/");
    }
}
