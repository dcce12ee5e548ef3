pub mod comparison_result;
pub mod error;
pub mod hardware_query;
