use crate::server::response::ApiError;

fn require_non_empty(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!("{field} cannot be empty")));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), ApiError> {
    require_non_empty(title, "title")
}

pub fn validate_url(url: &str) -> Result<(), ApiError> {
    require_non_empty(url, "url")
}

pub fn validate_category(category: &str) -> Result<(), ApiError> {
    require_non_empty(category, "category")
}
