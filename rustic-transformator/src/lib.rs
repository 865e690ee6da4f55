pub mod clock;
pub mod error;
pub mod load_timestamp_transformator;
pub mod month_period_transformator;
pub mod transformator;
pub mod transformator_output;
pub mod transformator_type;
pub mod unpivot;
pub mod wide_to_long_transformation;
