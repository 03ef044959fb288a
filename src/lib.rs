//! # Rule Encoder
//!
//! Rule-based categorical encoding for Apache DataFusion tables. Text and dictionary
//! columns become integer codes ready for a gradient-boosting model, and the label-to-code
//! rules are returned so that later tables (including ones with unseen categories) are
//! encoded consistently.
//!
//! ```rust,no_run
//! use rule_encoder::transformers::categorical_rules::encode;
//! # async fn run(df: datafusion::prelude::DataFrame) -> rule_encoder::exceptions::RuleEncoderResult<()> {
//! let (encoded, rules) = encode(df, None).await?;
//! encoded.show().await?;
//! println!("{:?}", rules);
//! # Ok(())
//! # }
//! ```

pub mod dataset;
pub mod exceptions;
mod logging;
pub mod pipeline;
pub mod rules;
pub mod settings;
pub mod transformers;
