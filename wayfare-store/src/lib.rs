pub mod app_config;
pub mod session;
pub mod persistence;
pub mod token;

pub use session::{SessionSnapshot, SessionStore};
pub use persistence::{spawn_persistence, JsonFileSink, ProfileSink, StoreError};
pub use token::TokenSlot;
