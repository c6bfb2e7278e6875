use axum::Router;
use domain_employees::{EmployeeService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let service = EmployeeService::new(state.upstream.clone());
    handlers::router(service)
}
