//! Upstream employee-record service client.
//!
//! [`EmployeeUpstream`] is the seam the service depends on. The HTTP
//! implementation wraps every single request in [`retry_with_backoff`], so a
//! 429 answer is retried while every other outcome is final.

use async_trait::async_trait;
use core_config::upstream::UpstreamConfig;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use uuid::Uuid;

use crate::error::{EmployeeError, EmployeeResult};
use crate::mapper::{EmployeeRecord, map_records};
use crate::models::{CreateEmployee, DeleteEmployeePayload, Employee, UpstreamResponse};
use crate::retry::{RetryConfig, retry_with_backoff};

/// Outbound calls to the upstream employee service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeUpstream: Send + Sync {
    /// Fetch and decode the full employee collection
    async fn list(&self) -> EmployeeResult<Vec<Employee>>;

    /// Fetch a single employee. `None` when the upstream answers 404.
    async fn get_by_id(&self, id: Uuid) -> EmployeeResult<Option<Employee>>;

    /// Create an employee and return the record the upstream assigned
    async fn create(&self, input: &CreateEmployee) -> EmployeeResult<Employee>;

    /// Delete by name, returning the upstream result flag
    async fn delete_by_name(&self, name: &str) -> EmployeeResult<bool>;
}

/// reqwest-backed [`EmployeeUpstream`]
#[derive(Clone)]
pub struct HttpEmployeeUpstream {
    client: Client,
    config: UpstreamConfig,
    retry: RetryConfig,
}

impl HttpEmployeeUpstream {
    pub fn new(config: UpstreamConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            retry: RetryConfig::from(&config),
            config,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Reachability check backing `/ready`.
    ///
    /// Any answer below 500 counts as reachable. Not retried.
    pub async fn ping(&self) -> EmployeeResult<()> {
        let response = self
            .client
            .get(&self.config.base_url)
            .send()
            .await
            .map_err(|e| self.unavailable(e))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(EmployeeError::Upstream {
                status: status.as_u16(),
                message: format!("readiness check answered {status}"),
            });
        }
        Ok(())
    }

    /// Send one request with retry on 429 and decode the `data` envelope.
    ///
    /// Returns `Ok(None)` on 404.
    async fn call<B, T>(
        &self,
        operation: &str,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> EmployeeResult<Option<T>>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        retry_with_backoff(operation, &self.retry, || {
            self.send_once(method.clone(), url, body)
        })
        .await
    }

    async fn send_once<B, T>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> EmployeeResult<Option<T>>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!("{} {}", method, url);

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| self.unavailable(e))?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let message = response.text().await.unwrap_or_default();
            return Err(EmployeeError::RateLimited(if message.is_empty() {
                status.to_string()
            } else {
                message
            }));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmployeeError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.unavailable(e))?;
        let envelope: UpstreamResponse<T> = serde_json::from_slice(&bytes)
            .map_err(|e| EmployeeError::Decode(e.to_string()))?;

        Ok(Some(envelope.data))
    }

    fn unavailable(&self, err: reqwest::Error) -> EmployeeError {
        error!(
            "Employee API request to {} failed: {}",
            self.config.base_url, err
        );
        EmployeeError::UpstreamUnavailable {
            url: self.config.base_url.clone(),
        }
    }

    fn unexpected_not_found(&self, url: &str) -> EmployeeError {
        EmployeeError::Upstream {
            status: StatusCode::NOT_FOUND.as_u16(),
            message: format!("{url} not found"),
        }
    }
}

#[async_trait]
impl EmployeeUpstream for HttpEmployeeUpstream {
    async fn list(&self) -> EmployeeResult<Vec<Employee>> {
        let url = &self.config.base_url;
        let records: Vec<EmployeeRecord> = self
            .call::<(), _>("list employees", Method::GET, url, None)
            .await?
            .ok_or_else(|| self.unexpected_not_found(url))?;

        map_records(records)
    }

    async fn get_by_id(&self, id: Uuid) -> EmployeeResult<Option<Employee>> {
        let url = self.config.employee_url(id);
        let record: Option<EmployeeRecord> = self
            .call::<(), _>("get employee", Method::GET, &url, None)
            .await?;

        record.map(Employee::try_from).transpose()
    }

    async fn create(&self, input: &CreateEmployee) -> EmployeeResult<Employee> {
        let url = &self.config.base_url;
        let record: EmployeeRecord = self
            .call("create employee", Method::POST, url, Some(input))
            .await?
            .ok_or_else(|| self.unexpected_not_found(url))?;

        Employee::try_from(record)
    }

    async fn delete_by_name(&self, name: &str) -> EmployeeResult<bool> {
        let url = &self.config.base_url;
        let payload = DeleteEmployeePayload { name };

        self.call("delete employee", Method::DELETE, url, Some(&payload))
            .await?
            .ok_or_else(|| self.unexpected_not_found(url))
    }
}
