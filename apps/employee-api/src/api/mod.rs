use axum::Router;

pub mod employees;
pub mod health;

/// Mount point of the employee routes below `/api`
pub const EMPLOYEE_PATH: &str = "/v1/employee";

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().nest(EMPLOYEE_PATH, employees::router(state))
}

/// Creates a router with the /ready endpoint that pings the upstream.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
