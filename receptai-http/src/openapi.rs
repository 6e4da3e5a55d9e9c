use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Receptai API",
        description = "Recipe catalog: faceted category listings, search, suggestions"
    ),
    paths(
        crate::handlers::health::health,
        crate::handlers::listing::catalog_listing,
        crate::handlers::search::search,
        crate::handlers::suggest::suggest_titles,
        crate::handlers::recipes::get_recipe,
        crate::handlers::internal::ingest_recipes,
        crate::handlers::internal::refresh_buckets,
    ),
    components(schemas(crate::dto::IngestResponse, crate::dto::RefreshResponse)),
    tags(
        (name = "catalog", description = "Category and recipe pages"),
        (name = "search", description = "Free-text search and suggestions"),
        (name = "internal", description = "Ingestion and maintenance"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;
