use std::fmt;

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash, Apiv2Schema)]
/// Coarse reading-difficulty classification
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash, Apiv2Schema)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Romance,
    Thriller,
    Fantasy,
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash, PartialOrd, Ord, Apiv2Schema,
)]
#[serde(rename_all = "kebab-case")]
/// Stable key of a catalog entry
pub enum CatalogKey {
    TheFaultInOurStars,
    MeBeforeYou,
    ItEndsWithUs,
    TheSilentPatient,
    GoneGirl,
    HarryPotter,
    TheHobbit,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
/// Catalog entry as exposed in views
pub struct CatalogBook {
    pub key: CatalogKey,
    pub title: String,
    pub author: String,
    /// Difficulty tier, 1 (easiest) to 3
    pub difficulty: u8,
    pub genre: Genre,
}

impl From<&CatalogEntry> for CatalogBook {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            key: entry.key,
            title: entry.title.to_string(),
            author: entry.author.to_string(),
            difficulty: entry.difficulty,
            genre: entry.genre,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
/// Answers of the initial profile quiz
pub struct ProfileQuizInput {
    pub difficulty_pref: i64,
    pub vocab_comfort: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
/// Answers of the post-read feedback quiz
pub struct FeedbackQuizInput {
    pub book_difficulty: i64,
    pub vocab_diff: i64,
    /// 1 when the book was finished, 0 otherwise
    #[serde(default = "FeedbackQuizInput::default_finished")]
    pub finished: i64,
}

impl FeedbackQuizInput {
    pub const DEFAULT_FINISHED: i64 = 1;

    fn default_finished() -> i64 {
        Self::DEFAULT_FINISHED
    }
}
