use thiserror::Error;
use wisp_css::LayoutError;

/// Failures of a generation pass.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The layout pass rejected the document.
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// An identifier counter ran out of values.
    #[error("{counter} id counter overflowed")]
    IdOverflow {
        /// Which counter: `element`, `link`, or `image`.
        counter: &'static str,
    },
}

/// Issue the next identifier from `counter`, starting at 1.
pub(crate) fn next_id(counter: &mut u32, name: &'static str) -> Result<u32, GenerateError> {
    *counter = counter
        .checked_add(1)
        .ok_or(GenerateError::IdOverflow { counter: name })?;
    Ok(*counter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one() {
        let mut counter = 0;
        assert_eq!(next_id(&mut counter, "element"), Ok(1));
        assert_eq!(next_id(&mut counter, "element"), Ok(2));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let mut counter = u32::MAX;
        assert_eq!(
            next_id(&mut counter, "link"),
            Err(GenerateError::IdOverflow { counter: "link" })
        );
        assert_eq!(counter, u32::MAX);
        assert_eq!(
            GenerateError::IdOverflow { counter: "link" }.to_string(),
            "link id counter overflowed"
        );
    }
}
