//! Blocking HTTP fetch of range queries.

use std::time::Duration;

use log::debug;
use thiserror::Error;

use promqueen_core::state::status;
use promqueen_core::{Error as QueryError, QueryRange, Series, decode_response};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where and what to query.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub url: String,
    pub query: String,
    pub window: Duration,
    pub step: Duration,
}

impl FetchConfig {
    /// The request window, ending now.
    pub fn range(&self) -> QueryRange {
        QueryRange::ending_now(&self.query, self.window, self.step)
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(Box<ureq::Error>),

    #[error("reading response: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Query(#[from] QueryError),
}

pub fn agent() -> ureq::Agent {
    ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build()
}

/// Send the query and return the raw response body.
pub fn request(agent: &ureq::Agent, config: &FetchConfig) -> Result<String, FetchError> {
    let range = config.range();
    let mut req = agent.get(&QueryRange::endpoint(&config.url));
    for (key, value) in range.params() {
        req = req.query(key, &value);
    }
    debug!("querying {} for {:?}", config.url, range.query);

    let response = match req.call() {
        Ok(response) => response,
        // Bad queries come back as 4xx with a JSON error body worth decoding.
        Err(ureq::Error::Status(code, response)) => {
            debug!("backend answered HTTP {code}");
            response
        }
        Err(e) => return Err(FetchError::Transport(Box::new(e))),
    };
    Ok(response.into_string()?)
}

pub fn decode(body: &str) -> Result<Vec<Series>, FetchError> {
    Ok(decode_response(body.as_bytes())?)
}

pub fn fetch_series(agent: &ureq::Agent, config: &FetchConfig) -> Result<Vec<Series>, FetchError> {
    decode(&request(agent, config)?)
}

/// Status-bar text for a failed fetch.
pub fn status_for(err: &FetchError) -> String {
    match err {
        FetchError::Query(QueryError::Backend {
            error_type,
            message,
        }) => status::backend_error(error_type, message),
        FetchError::Query(QueryError::NoSeries) => status::NO_SERIES.to_string(),
        other => status::fetch_failed(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve one canned HTTP response; yields the request line.
    fn serve_once(code: &str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let code = code.to_string();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut header = String::new();
            while reader.read_line(&mut header).unwrap() > 2 {
                header.clear();
            }
            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {code}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            request_line
        });
        (url, handle)
    }

    fn config(url: String) -> FetchConfig {
        FetchConfig {
            url,
            query: "up".into(),
            window: Duration::from_secs(900),
            step: Duration::from_secs(60),
        }
    }

    #[test]
    fn fetches_and_decodes_series() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"status":"success","data":{"resultType":"matrix","result":[
                {"metric":{"job":"a"},"values":[[1,"1"],[2,"2"]]}]}}"#,
        );
        let series = fetch_series(&agent(), &config(url)).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].values(), vec![1.0, 2.0]);

        let request_line = server.join().unwrap();
        assert!(request_line.starts_with("GET /api/v1/query_range?query=up&start="));
        assert!(request_line.contains("&step=60s"));
    }

    #[test]
    fn error_status_still_decodes_body() {
        let (url, server) = serve_once(
            "400 Bad Request",
            r#"{"status":"error","errorType":"bad_data","error":"parse error"}"#,
        );
        let err = fetch_series(&agent(), &config(url)).unwrap_err();
        server.join().unwrap();
        assert_eq!(status_for(&err), "Error from Prometheus: bad_data: parse error");
    }

    #[test]
    fn empty_result_status() {
        let err = decode(r#"{"status":"success","data":{"result":[]}}"#).unwrap_err();
        assert_eq!(status_for(&err), status::NO_SERIES);
    }

    #[test]
    fn unreachable_backend_is_transport_error() {
        // Bind then drop to get a port nobody is listening on.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let err = fetch_series(&agent(), &config(format!("http://127.0.0.1:{port}"))).unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert!(status_for(&err).starts_with("Fetch failed: request failed"));
    }
}
