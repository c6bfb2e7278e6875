use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Employee record as served by this API.
///
/// Field names on the wire match the upstream service so clients see the
/// same shape whether they call us or the upstream directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Employee {
    /// Upstream-assigned identifier
    pub id: Uuid,
    #[serde(rename = "employee_name")]
    #[schema(example = "Tiger Nixon")]
    pub name: String,
    #[serde(rename = "employee_salary")]
    #[schema(example = 320800)]
    pub salary: u32,
    #[serde(rename = "employee_age")]
    #[schema(example = 61)]
    pub age: u32,
    #[serde(rename = "employee_title")]
    #[schema(example = "Vice Chair Executive Principal of Chief Operations Implementation Specialist")]
    pub title: String,
    #[serde(rename = "employee_email")]
    #[schema(example = "tnixon@company.com")]
    pub email: String,
}

/// Input for creating an employee. Id and email are assigned upstream.
///
/// The same shape is forwarded as the upstream creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "Jill Jenkins")]
    pub name: String,
    #[schema(example = 139082)]
    pub salary: u32,
    #[schema(example = 48)]
    pub age: u32,
    #[schema(example = "Financial Advisor")]
    pub title: String,
}

/// Body of the upstream delete call, keyed by name
#[derive(Debug, Serialize)]
pub struct DeleteEmployeePayload<'a> {
    pub name: &'a str,
}

/// Envelope every upstream response is wrapped in
#[derive(Debug, Deserialize)]
pub struct UpstreamResponse<T> {
    pub data: T,
}
