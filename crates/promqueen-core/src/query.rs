//! Range queries against a Prometheus-compatible HTTP API and decoding of
//! their JSON responses into [`Series`].

use std::collections::BTreeMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Endpoint path, relative to the server base URL.
pub const QUERY_RANGE_PATH: &str = "/api/v1/query_range";

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A `query_range` request window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRange {
    pub query: String,
    /// Unix seconds.
    pub start: u64,
    /// Unix seconds.
    pub end: u64,
    pub step: Duration,
}

impl QueryRange {
    /// Window of length `window` ending at `end` (unix seconds).
    pub fn ending_at(query: &str, end: u64, window: Duration, step: Duration) -> Self {
        Self {
            query: query.to_string(),
            start: end.saturating_sub(window.as_secs()),
            end,
            step,
        }
    }

    /// Window of length `window` ending now.
    pub fn ending_now(query: &str, window: Duration, step: Duration) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self::ending_at(query, now, window, step)
    }

    /// URL query parameters, unencoded.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.query.clone()),
            ("start", self.start.to_string()),
            ("end", self.end.to_string()),
            ("step", format_step(self.step)),
        ]
    }

    /// Full endpoint URL for a server base such as `http://localhost:9090/`.
    pub fn endpoint(base: &str) -> String {
        format!("{}{QUERY_RANGE_PATH}", base.trim_end_matches('/'))
    }
}

/// Whole seconds as `"60s"`, otherwise fractional seconds as `"0.5"`.
fn format_step(step: Duration) -> String {
    if step.subsec_nanos() == 0 {
        format!("{}s", step.as_secs().max(1))
    } else {
        format!("{}", step.as_secs_f64())
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// One timestamped observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: f64,
    pub value: f64,
}

/// One labelled metric trace, oldest sample first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Series {
    pub labels: BTreeMap<String, String>,
    pub samples: Vec<Sample>,
}

impl Series {
    pub fn new(labels: BTreeMap<String, String>, samples: Vec<Sample>) -> Self {
        Self { labels, samples }
    }

    /// The value column, ready for projection.
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    pub fn latest(&self) -> Option<f64> {
        self.samples.last().map(|s| s.value)
    }

    /// Selector-style label string: `up{instance="a:9100", job="node"}`.
    pub fn describe(&self) -> String {
        let name = self.labels.get("__name__").map(String::as_str).unwrap_or("");
        let rest: Vec<String> = self
            .labels
            .iter()
            .filter(|(k, _)| k.as_str() != "__name__")
            .map(|(k, v)| format!("{k}={v:?}"))
            .collect();
        if rest.is_empty() && !name.is_empty() {
            name.to_string()
        } else {
            format!("{name}{{{}}}", rest.join(", "))
        }
    }
}

#[derive(Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    data: Option<Data>,
    #[serde(rename = "errorType", default)]
    error_type: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct Data {
    #[serde(default)]
    result: Vec<RawSeries>,
}

/// Matrix results carry `values`; instant vectors carry a single `value`.
#[derive(Deserialize)]
struct RawSeries {
    #[serde(default)]
    metric: BTreeMap<String, String>,
    #[serde(default)]
    values: Vec<(f64, String)>,
    #[serde(default)]
    value: Option<(f64, String)>,
}

fn parse_value(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| Error::BadSample(raw.to_string()))
}

impl RawSeries {
    fn into_series(self) -> Result<Series> {
        let samples = self
            .values
            .into_iter()
            .chain(self.value)
            .map(|(timestamp, raw)| {
                Ok(Sample {
                    timestamp,
                    value: parse_value(&raw)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Series::new(self.metric, samples))
    }
}

/// Decode a query API response body.
///
/// Backend-reported failures and empty result sets are errors, so a
/// successful return always holds at least one series.
pub fn decode_response(body: &[u8]) -> Result<Vec<Series>> {
    let envelope: Envelope = serde_json::from_slice(body)?;

    if envelope.status == "error" {
        return Err(Error::Backend {
            error_type: envelope.error_type.unwrap_or_else(|| "unknown".into()),
            message: envelope.error.unwrap_or_default(),
        });
    }

    let result = envelope.data.map(|d| d.result).unwrap_or_default();
    if result.is_empty() {
        return Err(Error::NoSeries);
    }
    result.into_iter().map(RawSeries::into_series).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATRIX: &str = r#"{
        "status": "success",
        "data": {
            "resultType": "matrix",
            "result": [
                {
                    "metric": {"__name__": "up", "job": "prometheus", "instance": "localhost:9090"},
                    "values": [[1435781430.781, "1"], [1435781445.781, "0.5"], [1435781460.781, "NaN"]]
                },
                {
                    "metric": {"job": "node"},
                    "values": [[1435781430.781, "3"]]
                }
            ]
        }
    }"#;

    #[test]
    fn decodes_matrix() {
        let series = decode_response(MATRIX.as_bytes()).unwrap();
        assert_eq!(series.len(), 2);
        let first = &series[0];
        assert_eq!(first.samples.len(), 3);
        assert_eq!(first.samples[1].value, 0.5);
        assert!(first.samples[2].value.is_nan());
        assert_eq!(first.samples[0].timestamp, 1435781430.781);
        assert_eq!(series[1].values(), vec![3.0]);
        assert_eq!(series[1].latest(), Some(3.0));
    }

    #[test]
    fn decodes_instant_vector() {
        let body = r#"{"status":"success","data":{"resultType":"vector","result":[
            {"metric":{},"value":[1700000000, "42"]}]}}"#;
        let series = decode_response(body.as_bytes()).unwrap();
        assert_eq!(series[0].values(), vec![42.0]);
    }

    #[test]
    fn backend_error_is_reported() {
        let body = r#"{"status":"error","errorType":"bad_data","error":"parse error at char 4"}"#;
        match decode_response(body.as_bytes()) {
            Err(Error::Backend {
                error_type,
                message,
            }) => {
                assert_eq!(error_type, "bad_data");
                assert_eq!(message, "parse error at char 4");
            }
            other => panic!("expected backend error, got {other:?}"),
        }
    }

    #[test]
    fn empty_result_is_no_series() {
        let body = r#"{"status":"success","data":{"resultType":"matrix","result":[]}}"#;
        assert!(matches!(
            decode_response(body.as_bytes()),
            Err(Error::NoSeries)
        ));
    }

    #[test]
    fn garbage_sample_is_rejected() {
        let body = r#"{"status":"success","data":{"resultType":"matrix","result":[
            {"metric":{},"values":[[1, "lots"]]}]}}"#;
        assert!(matches!(
            decode_response(body.as_bytes()),
            Err(Error::BadSample(s)) if s == "lots"
        ));
    }

    #[test]
    fn malformed_json_is_decode_error() {
        assert!(matches!(
            decode_response(b"<html>502</html>"),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn describe_formats_selector() {
        let series = decode_response(MATRIX.as_bytes()).unwrap();
        assert_eq!(
            series[0].describe(),
            r#"up{instance="localhost:9090", job="prometheus"}"#
        );
        assert_eq!(series[1].describe(), r#"{job="node"}"#);
        assert_eq!(Series::default().describe(), "{}");

        let bare = Series::new(
            BTreeMap::from([("__name__".to_string(), "up".to_string())]),
            Vec::new(),
        );
        assert_eq!(bare.describe(), "up");
    }

    #[test]
    fn range_params() {
        let range = QueryRange::ending_at(
            "rate(http_requests_total[5m])",
            1_000_000,
            Duration::from_secs(15 * 60),
            Duration::from_secs(60),
        );
        assert_eq!(range.start, 1_000_000 - 900);
        assert_eq!(
            range.params(),
            vec![
                ("query", "rate(http_requests_total[5m])".to_string()),
                ("start", "999100".to_string()),
                ("end", "1000000".to_string()),
                ("step", "60s".to_string()),
            ]
        );
    }

    #[test]
    fn fractional_step() {
        assert_eq!(format_step(Duration::from_millis(500)), "0.5");
        assert_eq!(format_step(Duration::ZERO), "1s");
    }

    #[test]
    fn endpoint_joins_base() {
        assert_eq!(
            QueryRange::endpoint("http://localhost:9090/"),
            "http://localhost:9090/api/v1/query_range"
        );
        assert_eq!(
            QueryRange::endpoint("http://prom:9090"),
            "http://prom:9090/api/v1/query_range"
        );
    }
}
