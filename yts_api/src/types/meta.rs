use serde::{Deserialize, Serialize};

/// Envelope wrapping every API response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Response<T> {
    /// `"ok"` on success, `"error"` otherwise.
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,

    /// Absent when the API reports an error.
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Response<T> {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
