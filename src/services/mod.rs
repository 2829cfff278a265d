pub mod providers;
pub mod recommendations;

pub use providers::{HttpTransport, RawResponse, Transport};
pub use recommendations::{BackendClient, RecommendationClient};
