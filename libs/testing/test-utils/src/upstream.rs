use core_config::upstream::UpstreamConfig;
use serde_json::{Value, json};
use std::net::TcpListener;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Path the employee resource is served under
pub const EMPLOYEE_PATH: &str = "/api/v1/employee";

/// Mock upstream employee service backed by a wiremock server.
///
/// Each instance listens on its own random port and is shut down on drop.
/// Mocks are matched in the order they are mounted, so a limited
/// `rate_limit` mounted before a success mock yields 429s first.
pub struct TestUpstream {
    server: MockServer,
}

impl TestUpstream {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        debug!("Mock employee upstream listening on {}", server.uri());
        Self { server }
    }

    /// Base URL of the employee resource on this server
    pub fn base_url(&self) -> String {
        format!("{}{}", self.server.uri(), EMPLOYEE_PATH)
    }

    /// Upstream config pointing at this server with a short retry delay
    pub fn config(&self) -> UpstreamConfig {
        UpstreamConfig {
            base_url: self.base_url(),
            request_timeout: Duration::from_secs(5),
            max_attempts: 3,
            retry_delay: Duration::from_millis(10),
        }
    }

    /// Upstream config pointing at a local port nothing listens on
    pub fn unreachable_config() -> UpstreamConfig {
        let port = TcpListener::bind("127.0.0.1:0")
            .and_then(|listener| listener.local_addr())
            .map(|addr| addr.port())
            .unwrap_or(9);

        UpstreamConfig {
            base_url: format!("http://127.0.0.1:{port}{EMPLOYEE_PATH}"),
            request_timeout: Duration::from_secs(2),
            max_attempts: 3,
            retry_delay: Duration::from_millis(10),
        }
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// `GET {base}` answers with the given records
    pub async fn mock_list(&self, records: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path(EMPLOYEE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": records })))
            .mount(&self.server)
            .await;
    }

    /// `GET {base}/{id}` answers with the given record
    pub async fn mock_get(&self, id: Uuid, record: Value) {
        Mock::given(method("GET"))
            .and(path(format!("{EMPLOYEE_PATH}/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": record })))
            .mount(&self.server)
            .await;
    }

    /// `GET {base}/{id}` answers 404
    pub async fn mock_get_not_found(&self, id: Uuid) {
        Mock::given(method("GET"))
            .and(path(format!("{EMPLOYEE_PATH}/{id}")))
            .respond_with(ResponseTemplate::new(404))
            .mount(&self.server)
            .await;
    }

    /// `POST {base}` answers with the given created record
    pub async fn mock_create(&self, created: Value) {
        Mock::given(method("POST"))
            .and(path(EMPLOYEE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": created })))
            .mount(&self.server)
            .await;
    }

    /// `DELETE {base}` with `{"name": name}` answers with the result flag
    pub async fn mock_delete(&self, name: &str, deleted: bool) {
        Mock::given(method("DELETE"))
            .and(path(EMPLOYEE_PATH))
            .and(body_json(json!({ "name": name })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": deleted })))
            .mount(&self.server)
            .await;
    }

    /// Answer 429 to the next `times` requests for `http_method` on `url_path`
    pub async fn rate_limit(&self, http_method: &str, url_path: &str, times: u64) {
        Mock::given(method(http_method))
            .and(path(url_path))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .up_to_n_times(times)
            .mount(&self.server)
            .await;
    }

    /// Answer every `http_method` request on `url_path` with `status` and `body`
    pub async fn mock_status(&self, http_method: &str, url_path: &str, status: u16, body: &str) {
        Mock::given(method(http_method))
            .and(path(url_path))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Requests received so far for `http_method` on `url_path`
    pub async fn request_count(&self, http_method: &str, url_path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request: &&Request| {
                request.method.as_str() == http_method && request.url.path() == url_path
            })
            .count()
    }
}
