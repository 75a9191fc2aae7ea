use wayfare_core::api::ApiError;
use wayfare_core::review::ReviewRejection;
use wayfare_core::search::SearchRejection;
use wayfare_core::{BookingRejection, Locale, Message};

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("Booking rejected: {0}")]
    Booking(#[from] BookingRejection),

    #[error("Review rejected: {0}")]
    Review(#[from] ReviewRejection),

    #[error("Search rejected: {0}")]
    Search(#[from] SearchRejection),

    #[error("Not signed in")]
    LoginRequired,

    #[error("Invalid input: {0:?}")]
    Invalid(Message),

    /// A backend call failed; `fallback` is shown when the server sent no message.
    #[error("{source}")]
    Api { source: ApiError, fallback: Message },
}

pub type ViewResult<T> = Result<T, ViewError>;

impl ViewError {
    pub fn api(source: ApiError, fallback: Message) -> Self {
        ViewError::Api { source, fallback }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ViewError::Api { source, .. } if source.is_unauthorized())
    }

    /// Text to put in front of the user.
    pub fn display_message(&self, locale: Locale) -> String {
        match self {
            ViewError::Booking(r) => r.message().text(locale).to_string(),
            ViewError::Review(r) => r.message().text(locale).to_string(),
            ViewError::Search(r) => r.message().text(locale).to_string(),
            ViewError::LoginRequired => Message::LoginRequired.text(locale).to_string(),
            ViewError::Invalid(m) => m.text(locale).to_string(),
            ViewError::Api { source, fallback } => source.display_message(locale, *fallback),
        }
    }
}
