use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    dto::game::{
        CreateGameRequest, DeleteGameResponse, GameResponse, ListGamesQuery, ListGamesResponse,
        UpdateGameRequest,
    },
    error::AppError,
    services::game_service,
    state::SharedState,
};

/// Routes managing catalog game records.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/v1/games", post(create_game).get(list_games))
        .route(
            "/v1/games/{id}",
            get(show_game).patch(update_game).delete(delete_game),
        )
}

/// Register a new game in the catalog.
#[utoipa::path(
    post,
    path = "/v1/games",
    tag = "games",
    request_body = CreateGameRequest,
    responses(
        (status = 201, description = "Game created", body = GameResponse),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_game(
    State(state): State<SharedState>,
    Json(payload): Json<CreateGameRequest>,
) -> Result<impl IntoResponse, AppError> {
    let game = game_service::create_game(&state, payload).await?;
    let location = format!("/v1/games/{}", game.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(game),
    ))
}

/// Fetch a single game by id.
#[utoipa::path(
    get,
    path = "/v1/games/{id}",
    tag = "games",
    params(("id" = i64, Path, description = "Identifier of the game")),
    responses(
        (status = 200, description = "Game found", body = GameResponse),
        (status = 404, description = "No game with this id")
    )
)]
pub async fn show_game(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<GameResponse>, AppError> {
    let game = game_service::show_game(&state, id).await?;
    Ok(Json(game))
}

/// Partially update a game, guarded by its version token.
#[utoipa::path(
    patch,
    path = "/v1/games/{id}",
    tag = "games",
    params(("id" = i64, Path, description = "Identifier of the game")),
    request_body = UpdateGameRequest,
    responses(
        (status = 200, description = "Game updated", body = GameResponse),
        (status = 404, description = "No game with this id"),
        (status = 409, description = "Concurrent edit detected"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_game(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateGameRequest>,
) -> Result<Json<GameResponse>, AppError> {
    let game = game_service::update_game(&state, id, payload).await?;
    Ok(Json(game))
}

/// Delete a game by id.
#[utoipa::path(
    delete,
    path = "/v1/games/{id}",
    tag = "games",
    params(("id" = i64, Path, description = "Identifier of the game")),
    responses(
        (status = 200, description = "Game deleted", body = DeleteGameResponse),
        (status = 404, description = "No game with this id")
    )
)]
pub async fn delete_game(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteGameResponse>, AppError> {
    game_service::delete_game(&state, id).await?;
    Ok(Json(DeleteGameResponse {
        message: "game successfully deleted".to_owned(),
    }))
}

/// List games matching the title query and tag filter.
#[utoipa::path(
    get,
    path = "/v1/games",
    tag = "games",
    params(ListGamesQuery),
    responses(
        (status = 200, description = "One page of matching games", body = ListGamesResponse),
        (status = 422, description = "Invalid filter parameters")
    )
)]
pub async fn list_games(
    State(state): State<SharedState>,
    Query(query): Query<ListGamesQuery>,
) -> Result<Json<ListGamesResponse>, AppError> {
    let page = game_service::list_games(&state, query).await?;
    Ok(Json(page))
}
