use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tutorial API",
        version = "0.1.0",
        description = "CRUD service for tutorials",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // Tutorials
        crate::handlers::tutorials::create_tutorial,
        crate::handlers::tutorials::list_tutorials,
        crate::handlers::tutorials::get_tutorial,
        crate::handlers::tutorials::list_published_tutorials,
        crate::handlers::tutorials::update_tutorial,
        crate::handlers::tutorials::delete_tutorial,
        crate::handlers::tutorials::delete_all_tutorials,

        // Operations
        crate::handlers::health::health_check,
        crate::handlers::metrics::get_prometheus_metrics,
    ),
    components(
        schemas(
            crate::models::tutorial::Tutorial,
            crate::models::tutorial::TutorialRequest,
            crate::handlers::health::HealthStatus,
            crate::handlers::health::ServiceHealth,
            crate::error::ErrorResponse,
            crate::error::ErrorCode,
        )
    ),
    tags(
        (name = "tutorials", description = "Tutorial management"),
        (name = "health", description = "Service health"),
        (name = "metrics", description = "Prometheus metrics")
    )
)]
pub struct ApiDoc;
