/// How a [`crate::transformator::Transformator`] output lands in the DataFrame.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformatorType {
    /// Overwrites an existing column.
    ReplaceColumn { column_name: String },
    /// Adds a column that must not exist yet.
    AppendColumn { column_name: String },
}
