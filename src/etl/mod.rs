//! Core ETL (Extract, Transform, Load) abstractions
//!
//! Export and import are both expressed as pipelines that extract records
//! from a source, transform them, and load them to a destination.

mod extract;
mod load;
mod pipeline;
mod transform;

pub use extract::Extractor;
pub use load::Loader;
pub use pipeline::Pipeline;
pub use transform::Transformer;
