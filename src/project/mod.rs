//! Project data model and backend collaborators
//!
//! - [`Category`] / [`CategoryBatch`]: how a fetched document is grouped
//! - [`ProjectExtractor`]: fetches a project from the backend
//! - [`PushRequestBuilder`] / [`ProjectLoader`]: push a collected tree back

mod category;
mod extractor;
mod loader;
mod request;

pub use category::{Category, CategoryBatch, TREE_FOLDERS};
pub use extractor::{ProjectExtractor, response_document};
pub use loader::ProjectLoader;
pub use request::{PushRequest, PushRequestBuilder};
