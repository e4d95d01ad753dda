use crate::{
    dao::{
        filters::{Filters, validate_filters},
        models::{GameDraft, GameEntity, validate_game},
    },
    dto::game::{
        CreateGameRequest, GameResponse, ListGamesQuery, ListGamesResponse, UpdateGameRequest,
    },
    error::ServiceError,
    state::SharedState,
    validation::Validator,
};

/// Sort expressions the list endpoint accepts.
const SORT_SAFELIST: &[&str] = &["id", "title", "score", "-id", "-title", "-score"];

/// Validate and persist a new game.
pub async fn create_game(
    state: &SharedState,
    request: CreateGameRequest,
) -> Result<GameResponse, ServiceError> {
    let draft: GameDraft = request.into();

    let mut v = Validator::new();
    validate_game(&mut v, &draft);
    if !v.valid() {
        return Err(ServiceError::Validation(v.into_errors()));
    }

    let game = state.game_store().insert(draft).await?;
    Ok(game.into())
}

/// Fetch a single game by id.
pub async fn show_game(state: &SharedState, id: i64) -> Result<GameResponse, ServiceError> {
    let game = state.game_store().get(id).await?;
    Ok(game.into())
}

/// Apply a partial update through the optimistic-concurrency protocol.
///
/// The stored record is read first, the payload merged over it, and the store
/// commits only if the version observed here is still current. A concurrent
/// writer therefore surfaces as an edit conflict instead of a silent
/// overwrite.
pub async fn update_game(
    state: &SharedState,
    id: i64,
    request: UpdateGameRequest,
) -> Result<GameResponse, ServiceError> {
    let store = state.game_store();
    let mut game = store.get(id).await?;

    if let Some(title) = request.title {
        game.title = title;
    }
    if let Some(score) = request.score {
        game.score = score;
    }
    if let Some(tags) = request.tags {
        game.tags = tags;
    }

    let mut v = Validator::new();
    validate_game(&mut v, &draft_of(&game));
    if !v.valid() {
        return Err(ServiceError::Validation(v.into_errors()));
    }

    let game = store.update(game).await?;
    Ok(game.into())
}

/// Remove a game by id.
pub async fn delete_game(state: &SharedState, id: i64) -> Result<(), ServiceError> {
    state.game_store().delete(id).await?;
    Ok(())
}

/// Run the filtered, sorted, paginated list query.
pub async fn list_games(
    state: &SharedState,
    query: ListGamesQuery,
) -> Result<ListGamesResponse, ServiceError> {
    let tag_filter = query.tag_filter();
    let filters = Filters {
        page: query.page,
        page_size: query.page_size,
        sort: query.sort,
        sort_safelist: SORT_SAFELIST,
    };

    let mut v = Validator::new();
    validate_filters(&mut v, &filters);
    if !v.valid() {
        return Err(ServiceError::Validation(v.into_errors()));
    }

    let (games, metadata) = state
        .game_store()
        .list(query.title, tag_filter, filters)
        .await?;

    Ok(ListGamesResponse {
        games: games.into_iter().map(Into::into).collect(),
        metadata: metadata.into(),
    })
}

/// Re-validate a merged entity through its draft form.
fn draft_of(game: &GameEntity) -> GameDraft {
    GameDraft {
        title: game.title.clone(),
        description: game.description.clone(),
        tags: Some(game.tags.clone()),
        score: game.score,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dao::game_store::memory::MemoryGameStore;
    use crate::dao::score::Score;
    use crate::state::AppState;

    fn test_state() -> SharedState {
        AppState::new(Arc::new(MemoryGameStore::new()))
    }

    fn create_request(title: &str, score: i32, tags: &[&str]) -> CreateGameRequest {
        CreateGameRequest {
            title: title.to_owned(),
            description: None,
            score: Score::from(score),
            tags: Some(tags.iter().map(|t| (*t).to_owned()).collect()),
        }
    }

    fn list_query(sort: &str) -> ListGamesQuery {
        ListGamesQuery {
            title: String::new(),
            tags: String::new(),
            page: 1,
            page_size: 20,
            sort: sort.to_owned(),
        }
    }

    #[tokio::test]
    async fn create_then_show_round_trips() {
        let state = test_state();
        let created = create_game(&state, create_request("Chess", 30, &["strategy"]))
            .await
            .unwrap();
        assert_eq!(created.version, 1);

        let shown = show_game(&state, created.id).await.unwrap();
        assert_eq!(shown.title, "Chess");
        assert_eq!(shown.score, Score::from(30));
    }

    #[tokio::test]
    async fn invalid_payload_never_reaches_the_store() {
        let state = test_state();
        let request = CreateGameRequest {
            title: String::new(),
            description: None,
            score: Score::from(0),
            tags: None,
        };

        let Err(ServiceError::Validation(errors)) = create_game(&state, request).await else {
            panic!("expected a validation failure");
        };
        assert!(errors.contains_key("title"));
        assert!(errors.contains_key("score"));
        assert!(errors.contains_key("tags"));

        // Nothing was persisted.
        let query = list_query("id");
        let page = list_games(&state, query).await.unwrap();
        assert_eq!(page.metadata.total_records, 0);
    }

    #[tokio::test]
    async fn update_merges_only_supplied_fields() {
        let state = test_state();
        let created = create_game(&state, create_request("Chess", 30, &["strategy"]))
            .await
            .unwrap();

        let request = UpdateGameRequest {
            score: Some(Score::from(45)),
            ..UpdateGameRequest::default()
        };
        let updated = update_game(&state, created.id, request).await.unwrap();
        assert_eq!(updated.title, "Chess");
        assert_eq!(updated.tags, vec!["strategy"]);
        assert_eq!(updated.score, Score::from(45));
        assert_eq!(updated.version, 2);
    }

    #[tokio::test]
    async fn update_rejects_invalid_merged_state() {
        let state = test_state();
        let created = create_game(&state, create_request("Chess", 30, &["strategy"]))
            .await
            .unwrap();

        let request = UpdateGameRequest {
            score: Some(Score::from(-1)),
            ..UpdateGameRequest::default()
        };
        let Err(ServiceError::Validation(errors)) =
            update_game(&state, created.id, request).await
        else {
            panic!("expected a validation failure");
        };
        assert!(errors.contains_key("score"));

        // The stored record kept its original state.
        let shown = show_game(&state, created.id).await.unwrap();
        assert_eq!(shown.score, Score::from(30));
        assert_eq!(shown.version, 1);
    }

    #[tokio::test]
    async fn missing_record_maps_to_not_found() {
        let state = test_state();
        assert!(matches!(
            show_game(&state, 42).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            delete_game(&state, 42).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_rejects_unsafelisted_sort() {
        let state = test_state();
        let Err(ServiceError::Validation(errors)) =
            list_games(&state, list_query("created_at")).await
        else {
            panic!("expected a validation failure");
        };
        assert!(errors.contains_key("sort"));
    }

    #[tokio::test]
    async fn list_returns_games_and_metadata() {
        let state = test_state();
        create_game(&state, create_request("Chess", 30, &["strategy"]))
            .await
            .unwrap();
        create_game(&state, create_request("Uno", 5, &["cards"]))
            .await
            .unwrap();

        let page = list_games(&state, list_query("-score")).await.unwrap();
        assert_eq!(page.games.len(), 2);
        assert_eq!(page.games[0].title, "Chess");
        assert_eq!(page.metadata.total_records, 2);
        assert_eq!(page.metadata.last_page, 1);
    }
}
