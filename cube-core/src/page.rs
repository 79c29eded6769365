/// Viewer and developer page state
use log::debug;

use crate::cube::CubeId;
use crate::error::{CoreError, Result};
use crate::media::MediaPanel;
use crate::route::Route;
use crate::shell::DocumentHead;
use crate::upload::{UploadIntent, UploadSink};

/// Which cube, if any, the page is showing media for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(CubeId),
}

impl Selection {
    pub fn cube(self) -> Option<CubeId> {
        match self {
            Selection::Unselected => None,
            Selection::Selected(id) => Some(id),
        }
    }
}

/// One page: three cubes, at most one selected
///
/// There is no way back to `Unselected`; a fresh page starts there.
#[derive(Debug, Clone)]
pub struct Page {
    route: Route,
    head: DocumentHead,
    selection: Selection,
}

impl Page {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            head: DocumentHead::default(),
            selection: Selection::Unselected,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn head(&self) -> &DocumentHead {
        &self.head
    }

    pub fn heading(&self) -> &'static str {
        self.route.heading()
    }

    pub fn cubes(&self) -> [CubeId; 3] {
        CubeId::ALL
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected(&self) -> Option<CubeId> {
        self.selection.cube()
    }

    /// Record a click on `cube`, replacing any earlier selection
    pub fn select(&mut self, cube: CubeId) -> Selection {
        let previous = std::mem::replace(&mut self.selection, Selection::Selected(cube));
        debug!("{} page: selected cube {cube} (was {previous:?})", self.route);
        previous
    }

    pub fn media_panel(&self) -> Option<MediaPanel> {
        self.selected().map(MediaPanel::for_cube)
    }

    pub fn upload_action_visible(&self) -> bool {
        self.route.allows_upload() && self.selected().is_some()
    }

    /// Record an upload intent for the selected cube
    pub fn upload(&self, sink: &mut dyn UploadSink) -> Result<UploadIntent> {
        if !self.route.allows_upload() {
            return Err(CoreError::UploadUnavailable(self.route.name()));
        }
        let cube = self.selected().ok_or(CoreError::NothingSelected)?;

        let intent = UploadIntent { cube };
        sink.record(intent);
        Ok(intent)
    }
}
