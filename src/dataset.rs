//! ## Encoder Inputs
//!
//! [`Dataset`] lists the containers the encoder accepts and [`ColumnKind`] classifies
//! Arrow fields into text, categorical, or untouched columns.

use crate::exceptions::{RuleEncoderError, RuleEncoderResult};
use arrow::array::{Array, ArrayRef};
use arrow::datatypes::{DataType, Field};
use arrow::record_batch::RecordBatch;
use datafusion::prelude::{DataFrame, SessionContext};

/// Input handed to the encoder.
pub enum Dataset {
    /// A DataFusion table.
    Frame(DataFrame),
    /// A single Arrow record batch; it is wrapped in a fresh session.
    Batch(RecordBatch),
    /// A bare Arrow array. Has no named columns, so it is never encodable.
    Values(ArrayRef),
}

impl Dataset {
    /// Short description of the container, used in diagnostics.
    pub fn type_name(&self) -> String {
        match self {
            Dataset::Frame(_) => "DataFrame".to_string(),
            Dataset::Batch(_) => "RecordBatch".to_string(),
            Dataset::Values(values) => format!("array of {}", values.data_type()),
        }
    }

    /// Resolve the input into a DataFrame, rejecting non-tabular containers.
    pub fn into_frame(self) -> RuleEncoderResult<DataFrame> {
        match self {
            Dataset::Frame(df) => Ok(df),
            Dataset::Batch(batch) => Ok(SessionContext::new().read_batch(batch)?),
            values @ Dataset::Values(_) => Err(RuleEncoderError::UnsupportedInput(format!(
                "expected a DataFrame or RecordBatch, found {}",
                values.type_name()
            ))),
        }
    }
}

impl From<DataFrame> for Dataset {
    fn from(df: DataFrame) -> Self {
        Dataset::Frame(df)
    }
}

impl From<RecordBatch> for Dataset {
    fn from(batch: RecordBatch) -> Self {
        Dataset::Batch(batch)
    }
}

impl From<ArrayRef> for Dataset {
    fn from(values: ArrayRef) -> Self {
        Dataset::Values(values)
    }
}

/// Binary values carry no guaranteed text rendering.
fn is_binary(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Binary
            | DataType::LargeBinary
            | DataType::BinaryView
            | DataType::FixedSizeBinary(_)
    )
}

/// How the encoder treats a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Plain strings.
    Text,
    /// Dictionary encoded; `ordered` when the dictionary order carries meaning.
    Categorical { ordered: bool },
    /// Anything else (numbers, booleans, dates, binary dictionaries, ...). Never encoded
    /// during derivation.
    Other,
}

impl ColumnKind {
    pub fn of(field: &Field) -> Self {
        match field.data_type() {
            DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => ColumnKind::Text,
            DataType::Dictionary(_, value_type) if !is_binary(value_type) => {
                ColumnKind::Categorical {
                    ordered: field.dict_is_ordered().unwrap_or(false),
                }
            }
            _ => ColumnKind::Other,
        }
    }

    /// True for columns that derivation turns into codes.
    pub fn is_encodable(&self) -> bool {
        !matches!(self, ColumnKind::Other)
    }
}
