/// Document head shared by every page
pub const DEFAULT_TITLE: &str = "Chad's Cube Display";
pub const DESCRIPTION: &str = "Interactive 3D cube display project";
pub const FAVICON: &str = "/favicon.ico";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHead {
    pub title: String,
    pub description: String,
    pub favicon: String,
}

impl DocumentHead {
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

impl Default for DocumentHead {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DESCRIPTION.to_string(),
            favicon: FAVICON.to_string(),
        }
    }
}
