//! Result type alias for OLI

use super::errors::OliError;

/// Result type alias for OLI operations
///
/// # Examples
///
/// ```
/// use oli::domain::result::Result;
/// use oli::domain::errors::OliError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(OliError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, OliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::OliError;

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(OliError::Pipeline("test error".to_string()));
        assert!(result.is_err());
    }

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
