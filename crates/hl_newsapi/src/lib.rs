pub mod client;
pub mod keys;

pub use client::{NewsApiClient, NewsApiConfig};
pub use keys::{KeyRing, Rotation};

pub mod prelude {
    pub use super::{KeyRing, NewsApiClient, NewsApiConfig, Rotation};
    pub use hl_core::{Error, NewsSource, Result};
}
