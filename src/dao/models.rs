//! Catalog entity definitions shared across layers.

use time::OffsetDateTime;

use crate::dao::score::Score;
use crate::validation::{self, Validator};

/// Longest accepted title, in bytes.
const MAX_TITLE_BYTES: usize = 500;
/// Most tags a single game may carry.
const MAX_TAGS: usize = 5;

/// A catalog game as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "pg-store", derive(sqlx::FromRow))]
pub struct GameEntity {
    /// Store-assigned identifier, strictly positive once persisted.
    pub id: i64,
    /// Insertion timestamp, assigned by the store and never exposed to
    /// clients.
    pub created_at: OffsetDateTime,
    /// Display title.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Category labels, 1 to 5 unique entries.
    pub tags: Vec<String>,
    /// Current score.
    pub score: Score,
    /// Optimistic-concurrency token; starts at 1, incremented by exactly one
    /// on every successful update.
    pub version: i32,
}

/// A game that has not been persisted yet.
///
/// Tags stay optional so validation can distinguish an absent list from an
/// empty one.
#[derive(Debug, Clone, Default)]
pub struct GameDraft {
    /// Display title.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Category labels, if the client supplied any.
    pub tags: Option<Vec<String>>,
    /// Initial score.
    pub score: Score,
}

/// Run every entity rule, accumulating failures per field.
pub fn validate_game(v: &mut Validator, game: &GameDraft) {
    v.check(!game.title.is_empty(), "title", "must be provided");
    v.check(
        game.title.len() <= MAX_TITLE_BYTES,
        "title",
        "must not be more than 500 bytes long",
    );
    v.check(game.score.value() != 0, "score", "must be provided");
    v.check(game.score.value() > 0, "score", "must be a positive integer");
    v.check(game.tags.is_some(), "tags", "must be provided");
    let tags = game.tags.as_deref().unwrap_or_default();
    v.check(!tags.is_empty(), "tags", "must contain at least 1 tag");
    v.check(
        tags.len() <= MAX_TAGS,
        "tags",
        "must not contain more than 5 tags",
    );
    v.check(
        validation::unique(tags),
        "tags",
        "must not contain duplicate values",
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> GameDraft {
        GameDraft {
            title: "Math Challenge".to_owned(),
            description: Some("Challenge yourself in math".to_owned()),
            tags: Some(vec!["math".to_owned(), "logic".to_owned()]),
            score: Score::from(100),
        }
    }

    fn errors_for(draft: &GameDraft) -> std::collections::HashMap<String, String> {
        let mut v = Validator::new();
        validate_game(&mut v, draft);
        v.into_errors()
    }

    #[test]
    fn valid_draft_passes() {
        assert!(errors_for(&valid_draft()).is_empty());
    }

    #[test]
    fn empty_title_fails() {
        let mut draft = valid_draft();
        draft.title.clear();
        assert_eq!(
            errors_for(&draft).get("title").map(String::as_str),
            Some("must be provided")
        );
    }

    #[test]
    fn oversized_title_fails() {
        let mut draft = valid_draft();
        draft.title = "x".repeat(501);
        assert_eq!(
            errors_for(&draft).get("title").map(String::as_str),
            Some("must not be more than 500 bytes long")
        );
    }

    #[test]
    fn title_limit_counts_bytes_not_chars() {
        let mut draft = valid_draft();
        // 255 two-byte characters: well under 500 chars, but 510 bytes.
        draft.title = "é".repeat(255);
        assert!(errors_for(&draft).contains_key("title"));
    }

    #[test]
    fn zero_score_fails() {
        let mut draft = valid_draft();
        draft.score = Score::from(0);
        assert_eq!(
            errors_for(&draft).get("score").map(String::as_str),
            Some("must be provided")
        );
    }

    #[test]
    fn negative_score_fails() {
        let mut draft = valid_draft();
        draft.score = Score::from(-5);
        assert_eq!(
            errors_for(&draft).get("score").map(String::as_str),
            Some("must be a positive integer")
        );
    }

    #[test]
    fn absent_tags_fail_with_a_single_message() {
        let mut draft = valid_draft();
        draft.tags = None;
        let errors = errors_for(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("tags").map(String::as_str),
            Some("must be provided")
        );
    }

    #[test]
    fn empty_tags_fail() {
        let mut draft = valid_draft();
        draft.tags = Some(Vec::new());
        assert_eq!(
            errors_for(&draft).get("tags").map(String::as_str),
            Some("must contain at least 1 tag")
        );
    }

    #[test]
    fn too_many_tags_fail() {
        let mut draft = valid_draft();
        draft.tags = Some(
            ["a", "b", "c", "d", "e", "f"]
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
        );
        assert_eq!(
            errors_for(&draft).get("tags").map(String::as_str),
            Some("must not contain more than 5 tags")
        );
    }

    #[test]
    fn duplicate_tags_record_exactly_one_failure() {
        let mut draft = valid_draft();
        draft.tags = Some(vec![
            "math".to_owned(),
            "math".to_owned(),
            "math".to_owned(),
            "logic".to_owned(),
            "logic".to_owned(),
        ]);
        let errors = errors_for(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("tags").map(String::as_str),
            Some("must not contain duplicate values")
        );
    }
}
