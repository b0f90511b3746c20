use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

use readingservice_recommendations::api::{
    CatalogBook, FeedbackQuizInput, Level, ProfileQuizInput,
};

pub type BookRecordId = i32;

/// Longest title or author accepted by the add book form
pub const MAX_FIELD_LENGTH: usize = 256;

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
/// Title and author of a book that is about to be stored on the owner's list
pub struct NewBookRecord {
    pub title: String,
    pub author: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
/// Book stored on the personal list of its owner
pub struct BookRecord {
    pub id: BookRecordId,
    pub owner: String,
    pub title: String,
    pub author: String,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct LoginForm {
    pub username: Option<String>,
}

impl LoginForm {
    pub fn username(self) -> Option<String> {
        non_blank(self.username)
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct AddBookForm {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl AddBookForm {
    /// Returns the book to store, None when the form should be silently ignored
    pub fn into_new_book(self) -> Option<NewBookRecord> {
        let title = non_blank(self.title).filter(|t| t.chars().count() <= MAX_FIELD_LENGTH)?;
        let author = non_blank(self.author).filter(|a| a.chars().count() <= MAX_FIELD_LENGTH)?;
        Some(NewBookRecord { title, author })
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct ProfileQuizForm {
    pub difficulty_pref: Option<i64>,
    pub vocab_comfort: Option<i64>,
}

impl ProfileQuizForm {
    /// None when any of the answers is missing
    pub fn submission(&self) -> Option<ProfileQuizInput> {
        Some(ProfileQuizInput {
            difficulty_pref: self.difficulty_pref?,
            vocab_comfort: self.vocab_comfort?,
        })
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct FeedbackQuizForm {
    pub book_difficulty: Option<i64>,
    pub vocab_diff: Option<i64>,
    pub finished: Option<i64>,
}

impl FeedbackQuizForm {
    /// None when a required answer is missing, `finished` defaults to 1
    pub fn submission(&self) -> Option<FeedbackQuizInput> {
        Some(FeedbackQuizInput {
            book_difficulty: self.book_difficulty?,
            vocab_diff: self.vocab_diff?,
            finished: self
                .finished
                .unwrap_or(FeedbackQuizInput::DEFAULT_FINISHED),
        })
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct LandingPage {
    pub current_user: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
/// Describes a form the user is expected to submit
pub struct FormPage {
    pub action: String,
    pub fields: Vec<String>,
}

impl FormPage {
    pub fn new(action: &str, fields: &[&str]) -> Self {
        Self {
            action: action.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct BooksPage {
    pub owner: String,
    /// Whole catalog in its stable order
    pub catalog: Vec<CatalogBook>,
    /// Books on the owner's personal list
    pub user_books: Vec<BookRecord>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
/// Empty when nothing was submitted yet
pub struct ProfileQuizView {
    pub level: Option<Level>,
    pub recommendation: Option<CatalogBook>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
/// Empty when nothing was submitted yet
pub struct FeedbackQuizView {
    pub new_level: Option<Level>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
