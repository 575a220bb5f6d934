use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{info, warn};

use crate::error::MalformedRecordError;
use crate::record::StatRecord;

/// Per-page counters reported by the crawler, in plot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    Urls,
    Words,
    WordLocations,
    Links,
    LinkWords,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Urls,
        Metric::Words,
        Metric::WordLocations,
        Metric::Links,
        Metric::LinkWords,
    ];

    /// Key of the counter inside a record's `statistics` object.
    pub fn key(self) -> &'static str {
        match self {
            Metric::Urls => "urlsCount",
            Metric::Words => "wordsCount",
            Metric::WordLocations => "wordLocationsCount",
            Metric::Links => "linksCount",
            Metric::LinkWords => "linkWordsCount",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Metric::Urls => "Количество URL-ов",
            Metric::Words => "Количество слов",
            Metric::WordLocations => "Количество позиций слов",
            Metric::Links => "Количество ссылок",
            Metric::LinkWords => "Количество слов в ссылках",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One metric's values, index-aligned with the source records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricSeries(Vec<u64>);

impl MetricSeries {
    pub fn values(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn max(&self) -> Option<u64> {
        self.0.iter().copied().max()
    }
}

impl From<Vec<u64>> for MetricSeries {
    fn from(values: Vec<u64>) -> Self {
        MetricSeries(values)
    }
}

/// Labels and one series per metric, all the same length.
///
/// Only built by [`extract`], which fills in every [`Metric`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    labels: Vec<String>,
    series: BTreeMap<Metric, MetricSeries>,
}

impl Extraction {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Series in plot order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, &MetricSeries)> {
        self.series.iter().map(|(&metric, series)| (metric, series))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn series(&self, metric: Metric) -> &MetricSeries {
        &self.series[&metric]
    }
}

pub fn extract(records: &[StatRecord]) -> Result<Extraction, MalformedRecordError> {
    let mut labels = Vec::with_capacity(records.len());
    let mut columns: BTreeMap<Metric, Vec<u64>> = Metric::ALL
        .iter()
        .map(|&metric| (metric, Vec::with_capacity(records.len())))
        .collect();

    for (index, record) in records.iter().enumerate() {
        let statistics = statistics_of(index, record)?;
        labels.push(record.url.clone());

        for (&metric, column) in columns.iter_mut() {
            let raw = statistics.and_then(|stats| stats.get(metric.key()));
            let value = read_count(raw).unwrap_or_else(|| {
                warn!(action = "coerce", component = "metric_extraction", record = index, metric = metric.key(), value = ?raw, "Non-numeric metric value, using 0");
                0
            });
            column.push(value);
        }
    }

    info!(
        action = "complete",
        component = "metric_extraction",
        record_count = labels.len(),
        metric_count = columns.len(),
        "Extracted metric series"
    );

    Ok(Extraction {
        labels,
        series: columns
            .into_iter()
            .map(|(metric, values)| (metric, MetricSeries::from(values)))
            .collect(),
    })
}

fn statistics_of(
    index: usize,
    record: &StatRecord,
) -> Result<Option<&Map<String, Value>>, MalformedRecordError> {
    match &record.statistics {
        None => Ok(None),
        Some(Value::Object(stats)) => Ok(Some(stats)),
        // null is present but not an object
        Some(other) => Err(MalformedRecordError {
            index,
            url: record.url.clone(),
            found: json_type(other),
        }),
    }
}

/// Reads a counter, treating an absent key as 0.
///
/// Returns `None` only when a value is present but cannot be read as a
/// non-negative integer.
fn read_count(value: Option<&Value>) -> Option<u64> {
    match value {
        None | Some(Value::Null) => Some(0),
        Some(value) => coerce_count(value),
    }
}

fn coerce_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.trunc() as u64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse;

    fn extract_json(json: &str) -> Result<Extraction, MalformedRecordError> {
        extract(&parse(json).unwrap())
    }

    fn values(extraction: &Extraction, metric: Metric) -> Vec<u64> {
        extraction.series(metric).values().to_vec()
    }

    #[test]
    fn test_partial_statistics() {
        let extraction =
            extract_json(r#"[{"url":"a","statistics":{"urlsCount":5,"wordsCount":10}}]"#).unwrap();

        assert_eq!(extraction.labels(), ["a"]);
        assert_eq!(values(&extraction, Metric::Urls), [5]);
        assert_eq!(values(&extraction, Metric::Words), [10]);
        assert_eq!(values(&extraction, Metric::WordLocations), [0]);
        assert_eq!(values(&extraction, Metric::Links), [0]);
        assert_eq!(values(&extraction, Metric::LinkWords), [0]);
    }

    #[test]
    fn test_missing_statistics_object() {
        let extraction =
            extract_json(r#"[{"url":"a"},{"url":"b","statistics":{"linksCount":3}}]"#).unwrap();

        assert_eq!(extraction.labels(), ["a", "b"]);
        assert_eq!(values(&extraction, Metric::Links), [0, 3]);
        for metric in [Metric::Urls, Metric::Words, Metric::WordLocations, Metric::LinkWords] {
            assert_eq!(values(&extraction, metric), [0, 0], "{metric}");
        }
    }

    #[test]
    fn test_empty_document() {
        let extraction = extract_json("[]").unwrap();

        assert!(extraction.is_empty());
        assert_eq!(extraction.iter().count(), Metric::ALL.len());
        assert!(extraction.iter().all(|(_, series)| series.is_empty()));
    }

    #[test]
    fn test_non_object_statistics_is_rejected() {
        let err = extract_json(r#"[{"url":"a"},{"url":"b","statistics":5}]"#).unwrap_err();

        assert_eq!(err.index, 1);
        assert_eq!(err.url, "b");
        assert_eq!(err.found, "a number");
    }

    #[test]
    fn test_null_statistics_is_rejected() {
        let err = extract_json(r#"[{"url":"a","statistics":null}]"#).unwrap_err();

        assert_eq!(err.index, 0);
        assert_eq!(err.url, "a");
        assert_eq!(err.found, "null");
    }

    #[test]
    fn test_series_align_with_records() {
        let json = r#"[
            {"url":"p0","statistics":{"urlsCount":7,"wordsCount":1,"wordLocationsCount":9,"linksCount":4,"linkWordsCount":2}},
            {"url":"p1"},
            {"url":"p2","statistics":{"wordLocationsCount":300}},
            {"url":"p3","statistics":{}}
        ]"#;
        let extraction = extract_json(json).unwrap();

        assert_eq!(extraction.len(), 4);
        for (_, series) in extraction.iter() {
            assert_eq!(series.len(), 4);
        }
        assert_eq!(values(&extraction, Metric::Urls), [7, 0, 0, 0]);
        assert_eq!(values(&extraction, Metric::WordLocations), [9, 0, 300, 0]);
        assert_eq!(values(&extraction, Metric::LinkWords), [2, 0, 0, 0]);
    }

    #[test]
    fn test_extract_is_repeatable() {
        let records = parse(
            r#"[{"url":"a","statistics":{"urlsCount":1}},{"url":"b","statistics":{"linksCount":"8"}}]"#,
        )
        .unwrap();

        assert_eq!(extract(&records).unwrap(), extract(&records).unwrap());
    }

    #[test]
    fn test_value_coercion() {
        let json = r#"[{"url":"a","statistics":{
            "urlsCount": 12.9,
            "wordsCount": " 42 ",
            "wordLocationsCount": -3,
            "linksCount": true,
            "linkWordsCount": null
        }}]"#;
        let extraction = extract_json(json).unwrap();

        assert_eq!(values(&extraction, Metric::Urls), [12]);
        assert_eq!(values(&extraction, Metric::Words), [42]);
        assert_eq!(values(&extraction, Metric::WordLocations), [0]);
        assert_eq!(values(&extraction, Metric::Links), [0]);
        assert_eq!(values(&extraction, Metric::LinkWords), [0]);
    }

    #[test]
    fn test_metric_order_matches_plot_order() {
        let extraction = extract_json("[]").unwrap();
        let keys: Vec<&str> = extraction.iter().map(|(m, _)| m.key()).collect();

        assert_eq!(
            keys,
            ["urlsCount", "wordsCount", "wordLocationsCount", "linksCount", "linkWordsCount"]
        );
    }
}
