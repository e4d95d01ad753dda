use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::dao::filters::Metadata;
use crate::dao::models::{GameDraft, GameEntity};
use crate::dao::score::Score;

/// Payload accepted when registering a new game.
///
/// Fields default when absent so validation can report every missing field
/// instead of failing at decode time.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGameRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Score in the `"<N> points"` wire form.
    #[serde(default)]
    #[schema(value_type = String, example = "120 points")]
    pub score: Score,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl From<CreateGameRequest> for GameDraft {
    fn from(request: CreateGameRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            tags: request.tags,
            score: request.score,
        }
    }
}

/// Partial update for an existing game; absent fields keep their stored
/// value.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateGameRequest {
    #[serde(default)]
    pub title: Option<String>,
    /// Score in the `"<N> points"` wire form.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub score: Option<Score>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Query parameters for the list endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListGamesQuery {
    /// Full-text title query.
    #[serde(default)]
    pub title: String,
    /// Comma-separated tag filter; matching records carry every listed tag.
    #[serde(default)]
    pub tags: String,
    /// Page number, 1-based.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Rows per page.
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    /// Sort expression, optionally prefixed with `-` for descending.
    #[serde(default = "default_sort")]
    pub sort: String,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

fn default_sort() -> String {
    "id".to_owned()
}

impl ListGamesQuery {
    /// Split the CSV tag filter into individual labels.
    pub fn tag_filter(&self) -> Vec<String> {
        self.tags
            .split(',')
            .filter(|tag| !tag.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

/// A game as returned to clients.
///
/// The creation timestamp is internal and never serialized.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameResponse {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
    /// Score in the `"<N> points"` wire form.
    #[schema(value_type = String, example = "120 points")]
    pub score: Score,
    pub version: i32,
}

impl From<GameEntity> for GameResponse {
    fn from(entity: GameEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            tags: entity.tags,
            score: entity.score,
            version: entity.version,
        }
    }
}

/// Page summary echoed alongside list results.
#[derive(Debug, Serialize, ToSchema)]
pub struct MetadataDto {
    pub current_page: i64,
    pub page_size: i64,
    pub last_page: i64,
    pub total_records: i64,
}

impl From<Metadata> for MetadataDto {
    fn from(metadata: Metadata) -> Self {
        Self {
            current_page: metadata.current_page,
            page_size: metadata.page_size,
            last_page: metadata.last_page,
            total_records: metadata.total_records,
        }
    }
}

/// List result: one page of games plus paging metadata.
#[derive(Debug, Serialize, ToSchema)]
pub struct ListGamesResponse {
    pub games: Vec<GameResponse>,
    pub metadata: MetadataDto,
}

/// Acknowledgement returned after a successful delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteGameResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn create_request_tolerates_missing_fields() {
        let request: CreateGameRequest = serde_json::from_str("{}").unwrap();
        assert!(request.title.is_empty());
        assert!(request.tags.is_none());
        assert_eq!(request.score, Score::from(0));
    }

    #[test]
    fn create_request_decodes_the_score_codec() {
        let request: CreateGameRequest =
            serde_json::from_str(r#"{"title": "Chess", "score": "30 points"}"#).unwrap();
        assert_eq!(request.score, Score::from(30));
    }

    #[test]
    fn create_request_rejects_malformed_score() {
        let result = serde_json::from_str::<CreateGameRequest>(r#"{"score": "30 coins"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn game_response_hides_the_creation_timestamp() {
        let entity = GameEntity {
            id: 7,
            created_at: OffsetDateTime::UNIX_EPOCH,
            title: "Chess".to_owned(),
            description: None,
            tags: vec!["strategy".to_owned()],
            score: Score::from(30),
            version: 1,
        };
        let body = serde_json::to_value(GameResponse::from(entity)).unwrap();
        assert!(body.get("created_at").is_none());
        assert!(body.get("description").is_none());
        assert_eq!(body["score"], "30 points");
        assert_eq!(body["version"], 1);
    }

    #[test]
    fn tag_filter_splits_csv_and_drops_empties() {
        let query = ListGamesQuery {
            title: String::new(),
            tags: "math,,logic".to_owned(),
            page: 1,
            page_size: 20,
            sort: "id".to_owned(),
        };
        assert_eq!(query.tag_filter(), vec!["math", "logic"]);

        let empty = ListGamesQuery {
            tags: String::new(),
            ..query
        };
        assert!(empty.tag_filter().is_empty());
    }
}
