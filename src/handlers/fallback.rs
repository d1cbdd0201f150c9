use crate::errors::ApiError;

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
