//! ## Transformer Interface
//!
//! This module defines the seam through which the Rule Encoder plugs into DataFusion
//! feature-engineering pipelines.
//!
//! - The [`Transformer`] trait is the common interface for a transformation step: `fit`
//!   learns state (for the encoder, its [`crate::rules::RuleSet`]) and `transform` extends
//!   the DataFrame's logical plan.
//! - The [`crate::impl_transformer`] macro implements the trait for a type that already has
//!   inherent `fit`/`transform` methods.

use crate::exceptions::RuleEncoderResult;
use async_trait::async_trait;
use datafusion::prelude::*;

/// Trait for components used in a data transformation pipeline.
///
/// Every transformer must provide a `fit` method (which may collect data to compute parameters)
/// and a `transform` method (which updates the DataFrame’s logical plan without triggering execution).
#[async_trait]
pub trait Transformer {
    /// Fit the transformer given a DataFrame.
    ///
    /// # Arguments
    ///
    /// * `df` - The input DataFrame.
    async fn fit(&mut self, df: &DataFrame) -> RuleEncoderResult<()>;

    /// Transform the input DataFrame, returning a new DataFrame with the transformation applied.
    ///
    /// # Arguments
    ///
    /// * `df` - The input DataFrame.
    fn transform(&self, df: DataFrame) -> RuleEncoderResult<DataFrame>;

    /// Returns true if the transformer is stateful (i.e. requires a call to fit before transform can be called).
    fn is_stateful(&self) -> bool;
}

/// Macro to implement the [`Transformer`] trait for Rule Encoder transformers.
///
/// The type must already have inherent methods:
/// - `async fn fit(&mut self, &DataFrame) -> RuleEncoderResult<()>`
/// - `fn transform(&self, DataFrame) -> RuleEncoderResult<DataFrame>`
/// - **`fn inherent_is_stateful(&self) -> bool`**
///
/// # Example
///
/// ```rust,no_run
/// use rule_encoder::exceptions::RuleEncoderResult;
/// use datafusion::prelude::DataFrame;
/// use rule_encoder::impl_transformer;
///
/// pub struct Passthrough;
///
/// impl Passthrough {
///     pub async fn fit(&mut self, _df: &DataFrame) -> RuleEncoderResult<()> {
///         Ok(())
///     }
///
///     pub fn transform(&self, df: DataFrame) -> RuleEncoderResult<DataFrame> {
///         Ok(df)
///     }
///
///     pub fn inherent_is_stateful(&self) -> bool {
///         false
///     }
/// }
///
/// impl_transformer!(Passthrough);
/// ```
#[macro_export]
macro_rules! impl_transformer {
    ($ty:ty) => {
        #[async_trait::async_trait]
        impl $crate::pipeline::Transformer for $ty {
            async fn fit(
                &mut self,
                df: &datafusion::prelude::DataFrame,
            ) -> $crate::exceptions::RuleEncoderResult<()> {
                <$ty>::fit(self, df).await
            }
            fn transform(
                &self,
                df: datafusion::prelude::DataFrame,
            ) -> $crate::exceptions::RuleEncoderResult<datafusion::prelude::DataFrame> {
                <$ty>::transform(self, df)
            }
            fn is_stateful(&self) -> bool {
                <$ty>::inherent_is_stateful(self)
            }
        }
    };
}
