/// Browser-navigable pages
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Viewer,
    Developer,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::Viewer, Route::Developer];

    /// Resolve a location path such as `/viewer` or `/developer/`
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        Self::ALL.into_iter().find(|route| route.path() == trimmed)
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Viewer => "/viewer",
            Route::Developer => "/developer",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Route::Viewer => "viewer",
            Route::Developer => "developer",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Route::Viewer => "Viewer Page",
            Route::Developer => "Developer Page",
        }
    }

    pub fn allows_upload(self) -> bool {
        matches!(self, Route::Developer)
    }
}

impl Default for Route {
    fn default() -> Self {
        Route::Viewer
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts a bare name (`viewer`) or a path (`/viewer`)
impl FromStr for Route {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|route| route.name() == lowered)
            .or_else(|| Self::parse(&lowered))
            .ok_or_else(|| CoreError::UnknownRoute(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paths() {
        assert_eq!(Route::parse("/viewer"), Some(Route::Viewer));
        assert_eq!(Route::parse("/developer/"), Some(Route::Developer));
        assert_eq!(Route::parse("/"), None);
        assert_eq!(Route::parse("/viewer/extra"), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Developer".parse::<Route>(), Ok(Route::Developer));
        assert_eq!("/viewer".parse::<Route>(), Ok(Route::Viewer));
        assert_eq!(
            "admin".parse::<Route>(),
            Err(CoreError::UnknownRoute("admin".to_string()))
        );
    }

    #[test]
    fn test_only_developer_uploads() {
        assert!(!Route::Viewer.allows_upload());
        assert!(Route::Developer.allows_upload());
    }
}
