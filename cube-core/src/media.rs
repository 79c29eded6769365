/// Placeholder media shown for a selected cube
use std::fmt;

use crate::cube::CubeId;

pub const PLACEHOLDER_HOST: &str = "placekitten.com";

/// Logical width and height of the media image
pub const MEDIA_SIZE: u32 = 400;

/// Image address derived from a cube identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaReference(String);

impl MediaReference {
    pub fn for_cube(cube: CubeId) -> Self {
        Self(format!(
            "https://{PLACEHOLDER_HOST}/{MEDIA_SIZE}/{MEDIA_SIZE}?image={cube}"
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the media panel renders for one cube
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPanel {
    pub cube: CubeId,
    pub heading: String,
    pub alt: String,
    pub src: MediaReference,
    pub width: u32,
    pub height: u32,
}

impl MediaPanel {
    pub fn for_cube(cube: CubeId) -> Self {
        let label = format!("Media for Cube {cube}");
        Self {
            cube,
            heading: label.clone(),
            alt: label,
            src: MediaReference::for_cube(cube),
            width: MEDIA_SIZE,
            height: MEDIA_SIZE,
        }
    }
}
