//! The service layer.
//!
//! Services sit between the HTTP surface and the storage/engine/model
//! crates. Each service is constructed once at startup with its
//! dependencies (database pool, calculator, astrologers) and shared behind
//! the application state. All authorization beyond token verification
//! happens here: every operation takes the caller's auth subject and scopes
//! reads and writes to that account.

mod chat;
mod context;
mod enrichment;
mod error;
mod profiles;
mod settings;
mod validation;

pub use chat::{ChatService, HistoryPage, MessagePair};
pub use context::HISTORY_WINDOW;
pub use enrichment::AstrologyFields;
pub use error::ServiceError;
pub use profiles::{CreateProfile, ProfileService, ProfileView, UpdateProfile};
pub use settings::{SettingsService, UpdateSettings};
pub use validation::{MAX_MESSAGE_LEN, MAX_PAGE_LIMIT};
