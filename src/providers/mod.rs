pub mod traits;
pub mod http;
pub mod newsdata;
pub mod guardian;
pub mod newsapi;
pub mod registry;

pub use traits::{NewsProvider, QueryParams};
pub use http::ApiClient;
pub use registry::ProviderRegistry;
