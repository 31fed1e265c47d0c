use crate::error::ApiError;

/// Result envelope used by every data-carrying operation.
///
/// The executor populates at most one side. Both sides `None` is a valid
/// outcome for reads where an empty result is not an error (e.g. a
/// `single()` read that matched nothing).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T> ApiResponse<T> {
    /// A successful response carrying data.
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    /// A successful response carrying nothing.
    pub fn empty() -> Self {
        Self {
            data: None,
            error: None,
        }
    }

    /// A failed response.
    pub fn error(error: ApiError) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }

    /// Convert into a `Result`, consuming the envelope.
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.data),
        }
    }

    /// Map the data side, leaving the error side untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            data: self.data.map(f),
            error: self.error,
        }
    }
}

/// Envelope for operations that carry no payload (delete, sign-out,
/// password recovery): only the error side exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ack {
    pub error: Option<ApiError>,
}

impl Ack {
    pub fn ok() -> Self {
        Self { error: None }
    }

    pub fn error(error: ApiError) -> Self {
        Self { error: Some(error) }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Convert into a `Result`, consuming the envelope.
    pub fn into_result(self) -> Result<(), ApiError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_carries_data_only() {
        let resp = ApiResponse::ok(vec![1, 2, 3]);
        assert!(resp.is_ok());
        assert_eq!(resp.data, Some(vec![1, 2, 3]));
        assert_eq!(resp.error, None);
    }

    #[test]
    fn empty_is_ok_without_data() {
        let resp: ApiResponse<Vec<i32>> = ApiResponse::empty();
        assert!(resp.is_ok());
        assert_eq!(resp.data, None);
    }

    #[test]
    fn error_carries_no_data() {
        let resp: ApiResponse<()> = ApiResponse::error(ApiError::transport("boom"));
        assert!(resp.is_err());
        assert_eq!(resp.data, None);
        assert_eq!(resp.into_result().unwrap_err().message, "boom");
    }

    #[test]
    fn map_preserves_error_side() {
        let resp: ApiResponse<i32> = ApiResponse::error(ApiError::transport("boom"));
        let mapped = resp.map(|n| n * 2);
        assert!(mapped.is_err());

        let mapped = ApiResponse::ok(21).map(|n| n * 2);
        assert_eq!(mapped.data, Some(42));
    }

    #[test]
    fn ack_into_result() {
        assert!(Ack::ok().into_result().is_ok());
        assert!(Ack::error(ApiError::transport("boom")).into_result().is_err());
    }
}
