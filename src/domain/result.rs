//! Result type alias for Arbor

use super::errors::ArborError;

/// Result type alias for Arbor operations
///
/// # Examples
///
/// ```
/// use arbor::domain::result::Result;
/// use arbor::domain::errors::ArborError;
///
/// fn failing_function() -> Result<()> {
///     Err(ArborError::Configuration("bad source".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ArborError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::StoreError;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> std::result::Result<i32, StoreError> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
