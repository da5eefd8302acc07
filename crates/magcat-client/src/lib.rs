pub mod brand;
pub mod client;
pub mod collect;
pub mod error;
pub mod types;

pub use brand::extract_brand;
pub use client::MagnitClient;
pub use collect::{collect_catalog, CatalogSource};
pub use error::ClientError;
pub use types::{ProductDetail, SearchItem, SearchPage};
