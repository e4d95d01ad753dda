use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the game catalog backend.
#[openapi(
    paths(
        crate::routes::games::create_game,
        crate::routes::games::show_game,
        crate::routes::games::update_game,
        crate::routes::games::delete_game,
        crate::routes::games::list_games,
        crate::routes::health::healthcheck,
    ),
    components(
        schemas(
            crate::dto::game::CreateGameRequest,
            crate::dto::game::UpdateGameRequest,
            crate::dto::game::GameResponse,
            crate::dto::game::ListGamesResponse,
            crate::dto::game::MetadataDto,
            crate::dto::game::DeleteGameResponse,
            crate::dto::health::HealthResponse,
        )
    ),
    tags(
        (name = "games", description = "Catalog record management"),
        (name = "health", description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
