//! Wire codec for the score field.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Message surfaced when a score payload does not match the wire format.
const INVALID_FORMAT: &str = "invalid score format";

/// Numeric score of a game, decorated on the wire as `"<N> points"`.
///
/// Storage keeps the bare integer; the decorated string exists only at the
/// JSON boundary. The serde implementations are written by hand so the codec
/// fires automatically wherever a game crosses that boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "pg-store", derive(sqlx::Type))]
#[cfg_attr(feature = "pg-store", sqlx(transparent))]
pub struct Score(i32);

impl Score {
    /// The raw integer value.
    pub fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for Score {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} points", self.0)
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{} points", self.0))
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(ScoreVisitor)
    }
}

struct ScoreVisitor;

impl<'de> Visitor<'de> for ScoreVisitor {
    type Value = Score;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a string of the form \"<integer> points\"")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Score, E> {
        let mut parts = value.split(' ');
        // Exactly two space-separated parts, the second being the literal
        // `points`.
        let (Some(number), Some("points"), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(E::custom(INVALID_FORMAT));
        };
        let parsed: i32 = number.parse().map_err(|_| E::custom(INVALID_FORMAT))?;
        Ok(Score(parsed))
    }
}
