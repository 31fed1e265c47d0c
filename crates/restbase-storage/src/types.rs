use serde::Deserialize;

/// Options for file upload.
#[derive(Debug, Clone, Default)]
pub struct FileOptions {
    pub content_type: Option<String>,
    pub cache_control: Option<String>,
    pub upsert: Option<bool>,
}

impl FileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_type(mut self, value: &str) -> Self {
        self.content_type = Some(value.to_string());
        self
    }

    pub fn cache_control(mut self, value: &str) -> Self {
        self.cache_control = Some(value.to_string());
        self
    }

    pub fn upsert(mut self, value: bool) -> Self {
        self.upsert = Some(value);
        self
    }
}

/// Response from a successful upload.
///
/// The store has served both capitalized and lowercase field names across
/// versions; both are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    #[serde(default, alias = "Id")]
    pub id: Option<String>,
    #[serde(default, alias = "Key")]
    pub key: Option<String>,
}
