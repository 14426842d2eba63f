/// Tavily REST API: request bodies, client, and transport errors.
pub mod client;
pub mod errors;
pub mod request;

pub use client::{DEFAULT_BASE_URL, TavilyClient};
pub use errors::ApiError;
pub use request::{
    ContentFormat, CrawlRequest, CrawlScope, Depth, ExtractRequest, MapRequest, ModeFlag,
    SearchRequest, TimeRange, Topic, parse_list,
};
