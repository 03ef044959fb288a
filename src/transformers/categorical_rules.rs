//! # Rule-Based Categorical Encoding
//!
//! This module turns text and dictionary-encoded columns into integer codes that a
//! gradient-boosting dataset constructor can consume, and returns the [`RuleSet`] used
//! so later tables can be encoded the same way.
//!
//! - [`derive_rules`] scans a DataFrame and builds one [`ColumnRule`] per text or
//!   categorical column. Ordered dictionaries are coded `1..=K` in dictionary order and
//!   include categories no row uses. Text and unordered dictionaries are coded `1..=K`
//!   by the lexicographic (byte) order of their distinct non-null values.
//! - [`apply_rules`] replaces every column named by a rule with its codes. Labels missing
//!   from the rule, and nulls, become `0`. Other columns are passed through untouched.
//! - [`encode`] derives when no rules are given and applies either way.
//! - [`CategoricalRuleEncoder`] wraps the same logic in the fit/transform shape used by
//!   [`crate::pipeline::Transformer`].

use crate::dataset::{ColumnKind, Dataset};
use crate::exceptions::{RuleEncoderError, RuleEncoderResult};
use crate::impl_transformer;
use crate::rules::{ColumnRule, RuleSet, UNSEEN_CODE};
use crate::settings::EncoderSettings;
use arrow::array::{Array, ArrayRef, AsArray, Int64Array, StringArray};
use arrow::datatypes::DataType;
use datafusion::common::Column;
use datafusion::error::DataFusionError;
use datafusion::prelude::DataFrame;
use datafusion_expr::{
    cast, create_udf, ColumnarValue, Expr, ScalarFunctionImplementation, ScalarUDF, Volatility,
};
use futures::future::try_join_all;
use futures::StreamExt;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Collect the non-null values of an array as text, in array order.
fn text_values(array: &ArrayRef, col_name: &str) -> RuleEncoderResult<Vec<String>> {
    let utf8 = arrow::compute::cast(array, &DataType::Utf8)?;
    let strings = utf8
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| {
            RuleEncoderError::InvalidParameter(format!(
                "Column '{}' cannot be rendered as text",
                col_name
            ))
        })?;
    Ok(strings.iter().flatten().map(str::to_string).collect())
}

/// Distinct non-null values of a text or unordered categorical column, sorted.
async fn sorted_distinct_labels(df: &DataFrame, column: &Column) -> RuleEncoderResult<Vec<String>> {
    let distinct_df = df
        .clone()
        .select(vec![
            cast(Expr::Column(column.clone()), DataType::Utf8).alias(&column.name)
        ])?
        .distinct()?;
    let batches = distinct_df.collect().await?;
    let mut labels = Vec::new();
    for batch in batches {
        labels.extend(text_values(batch.column(0), &column.name)?);
    }
    labels.sort_unstable();
    labels.dedup();
    Ok(labels)
}

/// Defined categories of an ordered dictionary column, in dictionary order.
///
/// Batches are read one at a time, partition by partition. Values that earlier
/// dictionaries lack are appended.
async fn dictionary_categories(df: &DataFrame, column: &Column) -> RuleEncoderResult<Vec<String>> {
    let streams = df
        .clone()
        .select(vec![Expr::Column(column.clone())])?
        .execute_stream_partitioned()
        .await?;
    let mut labels = Vec::new();
    let mut seen = HashSet::new();
    for mut stream in streams {
        while let Some(batch) = stream.next().await {
            let batch = batch?;
            let dictionary = batch.column(0).as_any_dictionary_opt().ok_or_else(|| {
                RuleEncoderError::InvalidParameter(format!(
                    "Expected a dictionary array for column '{}'",
                    column.name
                ))
            })?;
            for label in text_values(dictionary.values(), &column.name)? {
                if seen.insert(label.clone()) {
                    labels.push(label);
                }
            }
        }
    }
    Ok(labels)
}

async fn derive_column_rule(
    df: &DataFrame,
    column: Column,
    kind: ColumnKind,
) -> RuleEncoderResult<(String, ColumnRule)> {
    let labels = match kind {
        ColumnKind::Categorical { ordered: true } => dictionary_categories(df, &column).await?,
        _ => sorted_distinct_labels(df, &column).await?,
    };
    debug!(
        column = %column.name,
        ?kind,
        categories = labels.len(),
        "derived column rule"
    );
    Ok((column.name, ColumnRule::from_ordered_labels(labels)))
}

/// Build a rule for every text or categorical column of `df`, in schema order.
pub async fn derive_rules(df: &DataFrame) -> RuleEncoderResult<RuleSet> {
    let targets: Vec<(Column, ColumnKind)> = df
        .schema()
        .iter()
        .filter_map(|(qualifier, field)| {
            let kind = ColumnKind::of(field);
            kind.is_encodable()
                .then(|| (Column::new(qualifier.cloned(), field.name()), kind))
        })
        .collect();
    let derived = try_join_all(
        targets
            .into_iter()
            .map(|(column, kind)| derive_column_rule(df, column, kind)),
    )
    .await?;
    let rules: RuleSet = derived.into_iter().collect();
    info!(columns = rules.len(), "derived categorical rules");
    Ok(rules)
}

/// Scalar function mapping each text label to its code through the rule's hash index.
///
/// Nulls and labels outside the rule map to [`UNSEEN_CODE`].
fn rule_lookup_udf(col_name: &str, rule: Arc<ColumnRule>) -> ScalarUDF {
    let lookup: ScalarFunctionImplementation = Arc::new(move |args: &[ColumnarValue]| {
        let arrays = ColumnarValue::values_to_arrays(args)?;
        let labels = arrays
            .first()
            .and_then(|array| array.as_any().downcast_ref::<StringArray>())
            .ok_or_else(|| {
                DataFusionError::Execution("rule lookup expects one Utf8 argument".to_string())
            })?;
        let codes = Int64Array::from_iter_values(
            labels
                .iter()
                .map(|label| label.map_or(UNSEEN_CODE, |label| rule.lookup(label))),
        );
        Ok(ColumnarValue::Array(Arc::new(codes)))
    });
    create_udf(
        &format!("rule_codes_{}", col_name),
        vec![DataType::Utf8],
        DataType::Int64,
        Volatility::Immutable,
        lookup,
    )
}

/// Build the expression that replaces one column with its codes.
fn build_rule_expr(
    column: Column,
    data_type: &DataType,
    rule: &ColumnRule,
    settings: &EncoderSettings,
) -> Expr {
    let name = column.name.clone();
    let key = match data_type {
        DataType::Utf8 => Expr::Column(column),
        _ => cast(Expr::Column(column), DataType::Utf8),
    };
    let codes = rule_lookup_udf(&name, Arc::new(rule.clone())).call(vec![key]);
    cast(codes, settings.code_type.data_type()).alias(name)
}

/// Replace every column named in `rules` with its integer codes.
///
/// Every rule must name an existing column. Column order and row order are kept.
pub fn apply_rules(
    df: DataFrame,
    rules: &RuleSet,
    settings: &EncoderSettings,
) -> RuleEncoderResult<DataFrame> {
    let schema = df.schema();
    for (col_name, rule) in rules.iter() {
        if schema.field_with_name(None, col_name).is_err() {
            return Err(RuleEncoderError::MissingColumn(format!(
                "Column '{}' named by a rule not found in DataFrame",
                col_name
            )));
        }
        if let Some(max_code) = rule.max_code() {
            if max_code > settings.code_type.max_code() {
                return Err(RuleEncoderError::InvalidParameter(format!(
                    "Code {} in rule for column '{}' does not fit {}",
                    max_code,
                    col_name,
                    settings.code_type.data_type()
                )));
            }
        }
    }

    let exprs: Vec<Expr> = schema
        .iter()
        .map(|(qualifier, field)| {
            let column = Column::new(qualifier.cloned(), field.name());
            match rules.get(field.name()) {
                Some(rule) => {
                    debug!(
                        column = %field.name(),
                        labels = rule.len(),
                        "applying column rule"
                    );
                    build_rule_expr(column, field.data_type(), rule, settings)
                }
                None => Expr::Column(column),
            }
        })
        .collect();
    info!(columns = rules.len(), "applied categorical rules");
    df.select(exprs).map_err(RuleEncoderError::from)
}

/// Encode `dataset` with default [`EncoderSettings`].
///
/// With `rules` the given rules are applied as-is and returned. Without them, rules are
/// derived from the dataset first. Returns the encoded table and the rules used.
///
/// # Example
///
/// ```rust,no_run
/// use rule_encoder::transformers::categorical_rules::encode;
/// # async fn run(train: datafusion::prelude::DataFrame, test: datafusion::prelude::DataFrame)
/// #     -> rule_encoder::exceptions::RuleEncoderResult<()> {
/// let (train_encoded, rules) = encode(train, None).await?;
/// let (test_encoded, _) = encode(test, Some(rules)).await?;
/// # Ok(())
/// # }
/// ```
pub async fn encode(
    dataset: impl Into<Dataset>,
    rules: Option<RuleSet>,
) -> RuleEncoderResult<(DataFrame, RuleSet)> {
    encode_with_settings(dataset, rules, &EncoderSettings::default()).await
}

/// Same as [`encode`], with explicit settings.
pub async fn encode_with_settings(
    dataset: impl Into<Dataset>,
    rules: Option<RuleSet>,
    settings: &EncoderSettings,
) -> RuleEncoderResult<(DataFrame, RuleSet)> {
    let df = dataset.into().into_frame()?;
    let rules = match rules {
        Some(rules) => rules,
        None => derive_rules(&df).await?,
    };
    let encoded = apply_rules(df, &rules, settings)?;
    Ok((encoded, rules))
}

/// ------------------------- CategoricalRuleEncoder -------------------------
///
/// Stateful encoder: `fit` derives rules unless some were supplied up front, and
/// `transform` applies them.
#[derive(Debug, Clone, Default)]
pub struct CategoricalRuleEncoder {
    rules: Option<RuleSet>,
    settings: EncoderSettings,
}

impl CategoricalRuleEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use existing rules instead of deriving them on `fit`.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn with_settings(mut self, settings: EncoderSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Rules held by the encoder, if fitted or supplied.
    pub fn rules(&self) -> Option<&RuleSet> {
        self.rules.as_ref()
    }

    pub async fn fit(&mut self, df: &DataFrame) -> RuleEncoderResult<()> {
        if self.rules.is_none() {
            self.rules = Some(derive_rules(df).await?);
        }
        Ok(())
    }

    pub fn transform(&self, df: DataFrame) -> RuleEncoderResult<DataFrame> {
        let rules = self.rules.as_ref().ok_or(RuleEncoderError::FitNotCalled)?;
        apply_rules(df, rules, &self.settings)
    }

    fn inherent_is_stateful(&self) -> bool {
        true
    }
}

impl_transformer!(CategoricalRuleEncoder);
