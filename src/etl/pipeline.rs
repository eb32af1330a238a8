//! Pipeline orchestration for ETL operations

use super::{Extractor, Loader, Transformer};
use eyre::Result;

/// Extract, transform and load, in that order
///
/// The transformer's input must be the extractor's item and the loader's item
/// the transformer's output. Export runs
/// `ProjectExtractor → TreePlanner → TreeWriter`; import runs
/// `ImportAggregator → PushRequestBuilder → ProjectLoader`.
///
/// # Example
/// ```no_run
/// use digia_sync::config::TreeOptions;
/// use digia_sync::etl::{Extractor, Pipeline};
/// use digia_sync::layout::TreePlanner;
/// use digia_sync::project::CategoryBatch;
/// use digia_sync::storage::TreeWriter;
/// # use eyre::Result;
///
/// struct SavedDocument(serde_json::Value);
///
/// impl Extractor for SavedDocument {
///     type Item = CategoryBatch;
///     async fn extract(&self) -> Result<Vec<Self::Item>> {
///         Ok(CategoryBatch::from_document(&self.0))
///     }
/// }
///
/// # async fn example() -> Result<()> {
/// let document = serde_json::json!({"components": [{"name": "Button"}]});
/// let writer = TreeWriter::new(&TreeOptions::new("./project"));
///
/// let written = Pipeline::new(SavedDocument(document), TreePlanner, writer)
///     .run()
///     .await?;
/// println!("Wrote {} file(s)", written);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<E, T, L> {
    extractor: E,
    transformer: T,
    loader: L,
}

impl<E, T, L> Pipeline<E, T, L>
where
    E: Extractor,
    T: Transformer<Input = E::Item>,
    L: Loader<Item = T::Output>,
{
    /// Create a new pipeline
    pub fn new(extractor: E, transformer: T, loader: L) -> Self {
        Self {
            extractor,
            transformer,
            loader,
        }
    }

    /// Run all three stages
    ///
    /// Returns the count the loader reports. The loader runs even when nothing
    /// was extracted, so a [`TreeWriter`] still clears the tree for an empty
    /// project.
    ///
    /// [`TreeWriter`]: crate::storage::TreeWriter
    ///
    /// # Errors
    /// Returns an error if any stage fails. Nothing is retried.
    pub async fn run(&self) -> Result<usize> {
        let items = self.extractor.extract().await?;
        match items.len() {
            0 => log::warn!("Nothing extracted, loading an empty batch"),
            n => log::debug!("Extracted {} item(s)", n),
        }

        let planned = self.transformer.transform_many(items)?;
        log::debug!("Transformed {} item(s)", planned.len());

        let count = self.loader.load(planned).await?;
        log::debug!("Loader reported {} item(s)", count);
        Ok(count)
    }
}
