use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Stored product; absent fields are omitted.
#[derive(ToSchema)]
pub struct ProductDoc {
    pub id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub category: Option<String>,
}

/// Create/update payload. Nothing is required, unknown fields are ignored and
/// `null` clears a field on update.
#[derive(ToSchema)]
pub struct ProductInputDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub category: Option<String>,
}

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::products::create,
        crate::routes::products::list,
        crate::routes::products::get,
        crate::routes::products::update,
        crate::routes::products::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ProductDoc,
            ProductInputDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "products")
    )
)]
pub struct ApiDoc;
