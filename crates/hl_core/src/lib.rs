pub mod error;
pub mod fallback;
pub mod lookup;
pub mod selection;
pub mod source;
pub mod strategy;
pub mod test_utils;
pub mod types;

pub use error::{Error, Result};
pub use lookup::Category;
pub use selection::{Selection, SelectionPolicy};
pub use source::{EverythingQuery, HeadlinesQuery, NewsSource};
pub use strategy::{EndpointProfile, SelectionStrategy};
pub use types::{NewsArticle, RequestParams, UpstreamArticle, UpstreamResponse};

pub mod prelude {
    pub use crate::{EndpointProfile, Error, NewsArticle, NewsSource, RequestParams, Result};
}
