/// OpenAPI documentation aggregation.
pub mod documentation;
/// Catalog CRUD and list orchestration.
pub mod game_service;
/// Health check service.
pub mod health_service;
