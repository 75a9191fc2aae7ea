use crate::message::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_RATING: u8 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewAuthor {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub hotel_id: Option<String>,
    /// The backend populates the author under `userId`.
    #[serde(rename = "userId", default)]
    pub author: Option<ReviewAuthor>,
    pub comment: String,
    pub rating: u8,
    #[serde(deserialize_with = "crate::serde_dates::flexible")]
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn is_authored_by(&self, user_id: &str) -> bool {
        self.author.as_ref().is_some_and(|a| a.id == user_id)
    }

    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .and_then(|a| a.username.as_deref())
            .unwrap_or("anonymous")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub hotel_id: String,
    pub comment: String,
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReviewRejection {
    #[error("comment is empty")]
    EmptyComment,
    #[error("rating {0} outside 1..=5")]
    RatingOutOfRange(u8),
}

impl ReviewRejection {
    pub fn message(&self) -> Message {
        match self {
            ReviewRejection::EmptyComment => Message::ReviewCommentEmpty,
            ReviewRejection::RatingOutOfRange(_) => Message::ReviewRatingOutOfRange,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDraft {
    pub comment: String,
    pub rating: u8,
}

impl Default for ReviewDraft {
    fn default() -> Self {
        Self {
            comment: String::new(),
            rating: DEFAULT_RATING,
        }
    }
}

impl ReviewDraft {
    pub fn validate(&self, hotel_id: &str) -> Result<NewReview, ReviewRejection> {
        if self.comment.trim().is_empty() {
            return Err(ReviewRejection::EmptyComment);
        }
        if !(1..=5).contains(&self.rating) {
            return Err(ReviewRejection::RatingOutOfRange(self.rating));
        }
        Ok(NewReview {
            hotel_id: hotel_id.to_string(),
            comment: self.comment.clone(),
            rating: self.rating,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
