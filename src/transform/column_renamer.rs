//! Column renamer

use crate::etl::Transformer;
use crate::record::Record;
use eyre::Result;

/// Transformer that renames one column, keeping its position
///
/// A record without the source column passes through unchanged, so the
/// renamer can run again on its own output.
#[derive(Debug, Clone)]
pub struct ColumnRenamer {
    from: String,
    to: String,
}

impl ColumnRenamer {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// The people export calls gender `sex`
    pub fn sex_to_gender() -> Self {
        Self::new("sex", "gender")
    }
}

impl Transformer for ColumnRenamer {
    type Input = Record;
    type Output = Record;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        if !input.contains_key(&self.from) {
            return Ok(input);
        }

        let mut output = Record::with_capacity(input.len());
        for (column, value) in input {
            if column == self.from {
                output.insert(self.to.clone(), value);
            } else if column != self.to {
                output.insert(column, value);
            }
        }
        Ok(output)
    }
}
