use crate::api::{CatalogKey, FeedbackQuizInput, Level, ProfileQuizInput};
use crate::catalog::{Catalog, CatalogEntry};

/// Highest profile score still classified as Beginner
const PROFILE_BEGINNER_MAX: i128 = 2;
/// Highest profile score still classified as Intermediate
const PROFILE_INTERMEDIATE_MAX: i128 = 4;

/// Result of the initial profile quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileLeveling {
    pub score: i128,
    pub level: Level,
    pub recommendation: &'static CatalogEntry,
}

/// Result of the post-read feedback quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackLeveling {
    pub score: i128,
    pub level: Level,
}

/// Book recommended to a reader of a given level
pub fn recommended_book(level: Level) -> CatalogKey {
    match level {
        Level::Beginner => CatalogKey::TheFaultInOurStars,
        Level::Intermediate => CatalogKey::MeBeforeYou,
        Level::Advanced => CatalogKey::GoneGirl,
    }
}

/// Answers are arbitrary `i64`s, the sum is taken in `i128` so it stays exact
pub fn profile_score(input: &ProfileQuizInput) -> i128 {
    i128::from(input.difficulty_pref) + i128::from(input.vocab_comfort)
}

pub fn level_for_profile_score(score: i128) -> Level {
    if score <= PROFILE_BEGINNER_MAX {
        Level::Beginner
    } else if score <= PROFILE_INTERMEDIATE_MAX {
        Level::Intermediate
    } else {
        Level::Advanced
    }
}

pub fn feedback_score(input: &FeedbackQuizInput) -> i128 {
    i128::from(input.book_difficulty) - i128::from(input.vocab_diff)
        + i128::from(input.finished)
}

pub fn level_for_feedback_score(score: i128) -> Level {
    match score {
        i128::MIN..=0 => Level::Beginner,
        1 => Level::Intermediate,
        _ => Level::Advanced,
    }
}

/// Classifies a reader from the profile quiz and picks a first book for them
pub fn level_profile(input: &ProfileQuizInput) -> ProfileLeveling {
    let score = profile_score(input);
    let level = level_for_profile_score(score);
    let recommendation = Catalog::entry(recommended_book(level));
    tracing::debug!(score, %level, recommendation = recommendation.title, "Profile leveled");
    ProfileLeveling {
        score,
        level,
        recommendation,
    }
}

/// Re-classifies a reader after they report back on a book
pub fn relevel_feedback(input: &FeedbackQuizInput) -> FeedbackLeveling {
    let score = feedback_score(input);
    let level = level_for_feedback_score(score);
    tracing::debug!(score, %level, "Feedback releveled");
    FeedbackLeveling { score, level }
}
