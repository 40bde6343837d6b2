//! Wire shapes read from backend responses.

use serde::Deserialize;

/// Login response. Extra fields are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponseDto {
    pub(crate) role: String,
}

/// Error body in the backend's `{"detail": ...}` shape.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBodyDto {
    #[serde(default)]
    detail: Option<DetailDto>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DetailDto {
    Text(String),
    Items(Vec<DetailItemDto>),
}

#[derive(Debug, Deserialize)]
struct DetailItemDto {
    msg: String,
}

impl ErrorBodyDto {
    pub(crate) fn into_detail(self) -> Option<String> {
        match self.detail? {
            DetailDto::Text(text) => Some(text),
            DetailDto::Items(items) => Some(
                items
                    .into_iter()
                    .map(|item| item.msg)
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
        }
    }
}
