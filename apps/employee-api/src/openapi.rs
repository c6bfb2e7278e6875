use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Employee API",
        version = "0.1.0",
        description = "Facade over the upstream employee-record service"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = crate::api::EMPLOYEE_PATH, api = domain_employees::ApiDoc)
    )
)]
pub struct ApiDoc;
