use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, Uri},
    routing::get,
};
use axum_helpers::{
    AppError, AuditEvent, AuditOutcome,
    errors::responses::{
        BadRequestJsonResponse, BadRequestUuidResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::EmployeeResult;
use crate::models::{CreateEmployee, Employee};
use crate::service::EmployeeService;
use crate::upstream::EmployeeUpstream;

pub const TAG: &str = "employees";

/// OpenAPI documentation for Employees API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_employees,
        search_employees,
        get_employee,
        highest_salary,
        top_ten_earner_names,
        create_employee,
        delete_employee,
    ),
    components(
        schemas(Employee, CreateEmployee),
        responses(
            NotFoundResponse,
            BadRequestUuidResponse,
            BadRequestJsonResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Employee records proxied from the upstream employee service")
    )
)]
pub struct ApiDoc;

/// Create the employee router with all HTTP endpoints
pub fn router<U: EmployeeUpstream + 'static>(service: EmployeeService<U>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route("/search/{fragment}", get(search_employees))
        .route(
            "/highestSalary",
            get(highest_salary).delete(delete_shadowed_id),
        )
        .route(
            "/topTenHighestEarningEmployeeNames",
            get(top_ten_earner_names).delete(delete_shadowed_id),
        )
        .route("/{id}", get(get_employee).delete(delete_employee))
        .with_state(shared_service)
}

/// List all employees
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All employees", body = Vec<Employee>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_employees<U: EmployeeUpstream>(
    State(service): State<Arc<EmployeeService<U>>>,
) -> EmployeeResult<Json<Vec<Employee>>> {
    let employees = service.list_employees().await?;
    Ok(Json(employees))
}

/// Search employees by name fragment (case-insensitive)
#[utoipa::path(
    get,
    path = "/search/{fragment}",
    tag = TAG,
    params(
        ("fragment" = String, Path, description = "Substring to look for in employee names")
    ),
    responses(
        (status = 200, description = "Matching employees", body = Vec<Employee>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_employees<U: EmployeeUpstream>(
    State(service): State<Arc<EmployeeService<U>>>,
    Path(fragment): Path<String>,
) -> EmployeeResult<Json<Vec<Employee>>> {
    let employees = service.search_employees(&fragment).await?;
    Ok(Json(employees))
}

/// Get an employee by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "Employee ID (UUID)")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_employee<U: EmployeeUpstream>(
    State(service): State<Arc<EmployeeService<U>>>,
    Path(id): Path<String>,
) -> EmployeeResult<Json<Employee>> {
    let employee = service.get_employee(&id).await?;
    Ok(Json(employee))
}

/// Highest salary across all employees
#[utoipa::path(
    get,
    path = "/highestSalary",
    tag = TAG,
    responses(
        (status = 200, description = "Highest salary, 0 when there are no employees", body = u32),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn highest_salary<U: EmployeeUpstream>(
    State(service): State<Arc<EmployeeService<U>>>,
) -> EmployeeResult<Json<u32>> {
    let salary = service.highest_salary().await?;
    Ok(Json(salary))
}

/// Names of the ten highest earners
#[utoipa::path(
    get,
    path = "/topTenHighestEarningEmployeeNames",
    tag = TAG,
    responses(
        (status = 200, description = "Up to ten names, highest salary first", body = Vec<String>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn top_ten_earner_names<U: EmployeeUpstream>(
    State(service): State<Arc<EmployeeService<U>>>,
) -> EmployeeResult<Json<Vec<String>>> {
    let names = service.top_ten_earner_names().await?;
    Ok(Json(names))
}

/// Create a new employee
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateEmployee,
    responses(
        (status = 200, description = "Employee created", body = Employee),
        (status = 400, response = BadRequestJsonResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_employee<U: EmployeeUpstream>(
    State(service): State<Arc<EmployeeService<U>>>,
    headers: HeaderMap,
    payload: Result<Json<CreateEmployee>, JsonRejection>,
) -> Result<Json<Employee>, AppError> {
    let Json(input) = payload?;
    let employee = service.create_employee(input).await?;

    AuditEvent::new(
        "employee.create",
        Some(format!("employee:{}", employee.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({
        "employee_name": employee.name,
        "employee_title": employee.title,
    }))
    .log();

    Ok(Json(employee))
}

/// Delete an employee by ID, returning its name as plain text
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "Employee ID (UUID)")
    ),
    responses(
        (status = 200, description = "Name of the deleted employee", body = String, content_type = "text/plain"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_employee<U: EmployeeUpstream>(
    State(service): State<Arc<EmployeeService<U>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> EmployeeResult<String> {
    delete_and_audit(&service, &headers, &id).await
}

/// DELETE on a literal aggregate route, which wins over `/{id}` when matching.
/// The segment is still an id as far as the client is concerned, so it takes
/// the same path as any other id and is rejected as an invalid UUID.
async fn delete_shadowed_id<U: EmployeeUpstream>(
    State(service): State<Arc<EmployeeService<U>>>,
    headers: HeaderMap,
    uri: Uri,
) -> EmployeeResult<String> {
    let id = uri.path().trim_start_matches('/');
    delete_and_audit(&service, &headers, id).await
}

async fn delete_and_audit<U: EmployeeUpstream>(
    service: &EmployeeService<U>,
    headers: &HeaderMap,
    id: &str,
) -> EmployeeResult<String> {
    let result = service.delete_employee(id).await;

    let outcome = if result.is_ok() {
        AuditOutcome::Success
    } else {
        AuditOutcome::Failure
    };
    AuditEvent::new("employee.delete", Some(format!("employee:{}", id)), outcome)
        .with_ip(extract_ip_from_headers(headers))
        .with_user_agent(extract_user_agent(headers))
        .with_details(match &result {
            Ok(name) => json!({ "employee_name": name }),
            Err(e) => json!({ "error": e.to_string() }),
        })
        .log();

    result
}
