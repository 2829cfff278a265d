pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult, StoreError};
pub use models::{Envelope, Item, PromptRequest};
pub use services::{BackendClient, HttpTransport, RecommendationClient, Transport};
pub use store::{Phase, SessionSnapshot, Store};
