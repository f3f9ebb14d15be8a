//! Pipeline orchestration for ETL operations

use super::{Extractor, Loader, Transformer};
use eyre::Result;

/// ETL Pipeline that runs Extract, Transform, and Load once, in order
///
/// # Type Parameters
/// - `E`: Extractor type
/// - `T`: Transformer type (must transform from E::Item)
/// - `L`: Loader type (must load T::Output)
///
/// # Example
/// ```no_run
/// use people_etl::etl::Pipeline;
/// # use people_etl::etl::{Extractor, Transformer, Loader};
/// # use eyre::Result;
/// # struct MyExtractor;
/// # impl Extractor for MyExtractor {
/// #     type Item = i32;
/// #     async fn extract(&self) -> Result<Vec<Self::Item>> { Ok(vec![]) }
/// # }
/// # struct MyTransformer;
/// # impl Transformer for MyTransformer {
/// #     type Input = i32;
/// #     type Output = i32;
/// #     fn transform(&self, input: Self::Input) -> Result<Self::Output> { Ok(input) }
/// # }
/// # struct MyLoader;
/// # impl Loader for MyLoader {
/// #     type Item = i32;
/// #     async fn load(&self, items: Vec<Self::Item>) -> Result<usize> { Ok(items.len()) }
/// # }
///
/// # async fn example() -> Result<()> {
/// let pipeline = Pipeline::new(MyExtractor, MyTransformer, MyLoader);
///
/// let count = pipeline.run().await?;
/// println!("Loaded {} rows", count);
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

    /// Run the complete ETL pipeline
    ///
    /// Steps:
    /// 1. Extract items from source
    /// 2. Transform each item, only if something was extracted
    /// 3. Load items to destination
    ///
    /// Returns the number of items loaded
    ///
    /// # Errors
    /// Returns the first error of any stage; later stages do not run
    pub async fn run(&self) -> Result<usize> {
        log::debug!("Starting ETL pipeline");

        let items = self.extractor.extract().await?;
        log::debug!("Extracted {} items", items.len());

        if items.is_empty() {
            log::warn!("No rows extracted, skipping transform and load");
            return Ok(0);
        }

        let transformed = self.transformer.transform_many(items)?;
        log::debug!("Transformed {} items", transformed.len());

        let count = self.loader.load(transformed).await?;
        log::debug!("Loaded {} items", count);

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::Result;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    struct MockExtractor(Vec<i32>);

    impl Extractor for MockExtractor {
        type Item = i32;
        async fn extract(&self) -> Result<Vec<Self::Item>> {
            Ok(self.0.clone())
        }
    }

    struct FailingExtractor;

    impl Extractor for FailingExtractor {
        type Item = i32;
        async fn extract(&self) -> Result<Vec<Self::Item>> {
            eyre::bail!("source unavailable")
        }
    }

    struct DoubleTransformer(Arc<AtomicBool>);

    impl Transformer for DoubleTransformer {
        type Input = i32;
        type Output = i32;
        fn transform(&self, input: Self::Input) -> Result<Self::Output> {
            self.0.store(true, Ordering::SeqCst);
            Ok(input * 2)
        }
    }

    struct SumLoader(Arc<Mutex<Option<i32>>>);

    impl Loader for SumLoader {
        type Item = i32;
        async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
            let sum: i32 = items.iter().sum();
            *self.0.lock().unwrap() = Some(sum);
            Ok(items.len())
        }
    }

    #[tokio::test]
    async fn test_pipeline() {
        let result = Arc::new(Mutex::new(None));
        let transformed = Arc::new(AtomicBool::new(false));

        let pipeline = Pipeline::new(
            MockExtractor(vec![1, 2, 3]),
            DoubleTransformer(transformed.clone()),
            SumLoader(result.clone()),
        );

        let count = pipeline.run().await.unwrap();
        assert_eq!(count, 3);
        assert!(transformed.load(Ordering::SeqCst));
        assert_eq!(*result.lock().unwrap(), Some(12)); // (1+2+3)*2 = 12
    }

    #[tokio::test]
    async fn test_empty_pipeline_skips_transform_and_load() {
        let result = Arc::new(Mutex::new(None));
        let transformed = Arc::new(AtomicBool::new(false));

        let pipeline = Pipeline::new(
            MockExtractor(vec![]),
            DoubleTransformer(transformed.clone()),
            SumLoader(result.clone()),
        );

        let count = pipeline.run().await.unwrap();
        assert_eq!(count, 0);
        assert!(!transformed.load(Ordering::SeqCst));
        assert_eq!(*result.lock().unwrap(), None);
    }

    #[tokio::test]
    async fn test_extract_failure_stops_pipeline() {
        let result = Arc::new(Mutex::new(None));
        let pipeline = Pipeline::new(
            FailingExtractor,
            DoubleTransformer(Arc::new(AtomicBool::new(false))),
            SumLoader(result.clone()),
        );

        assert!(pipeline.run().await.is_err());
        assert_eq!(*result.lock().unwrap(), None);
    }
}
