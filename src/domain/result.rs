//! Result type alias for anonymize-df

use super::errors::AnonymizeError;

/// Result type alias for anonymize-df operations
///
/// # Examples
///
/// ```
/// use anonymize_df::domain::result::Result;
/// use anonymize_df::domain::errors::AnonymizeError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(AnonymizeError::ColumnNotFound("Name".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, AnonymizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
