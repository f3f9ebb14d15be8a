//! Transformer trait for data transformation

use eyre::{Result, WrapErr};

/// Transformer trait for transforming data items
///
/// Implementors define how to transform items:
/// - Renaming or normalizing fields
/// - Deriving new fields
/// - Cleaning values
/// - Validation
///
/// # Example
/// ```
/// use people_etl::etl::Transformer;
/// use eyre::Result;
///
/// struct Trim;
///
/// impl Transformer for Trim {
///     type Input = String;
///     type Output = String;
///
///     fn transform(&self, input: Self::Input) -> Result<Self::Output> {
///         Ok(input.trim().to_string())
///     }
/// }
///
/// assert_eq!(Trim.transform("  ada ".to_string()).unwrap(), "ada");
/// ```
pub trait Transformer: Send + Sync {
    /// Input item type
    type Input: Send;

    /// Output item type after transformation
    type Output: Send;

    /// Transform a single item
    ///
    /// # Errors
    /// Returns an error if transformation fails (validation, conversion, etc.)
    fn transform(&self, input: Self::Input) -> Result<Self::Output>;

    /// Transform multiple items (default batch implementation)
    ///
    /// Stops at the first failing item; the error names its 1-based position.
    fn transform_many(&self, inputs: Vec<Self::Input>) -> Result<Vec<Self::Output>> {
        inputs
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                self.transform(item)
                    .wrap_err_with(|| format!("Failed to transform row {}", i + 1))
            })
            .collect()
    }

    /// Feed the output of this transformer into `next`
    fn then<N>(self, next: N) -> Chain<Self, N>
    where
        Self: Sized,
        N: Transformer<Input = Self::Output>,
    {
        Chain {
            first: self,
            second: next,
        }
    }
}

/// Two transformers applied one after the other
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Transformer for Chain<A, B>
where
    A: Transformer,
    B: Transformer<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        self.second.transform(self.first.transform(input)?)
    }

    fn transform_many(&self, inputs: Vec<Self::Input>) -> Result<Vec<Self::Output>> {
        self.second.transform_many(self.first.transform_many(inputs)?)
    }
}

/// Identity transformer that passes items through unchanged
pub struct IdentityTransformer<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for IdentityTransformer<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> IdentityTransformer<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Send + Sync> Transformer for IdentityTransformer<T> {
    type Input = T;
    type Output = T;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        Ok(input)
    }
}
