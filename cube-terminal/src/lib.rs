/// Terminal preview of the cube pages
use anyhow::Result;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    style::Color,
    terminal::{self},
};
use cube_core::{CubeId, LogUploadSink, Page, RenderSurface, Route, SurfaceConfig};
use log::{debug, info};
use std::cell::RefCell;
use std::io::{stdout, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

pub mod host;
pub mod layout;
pub mod renderer;

pub use host::TermHost;
pub use layout::{Layout, Viewport};
pub use renderer::AsciiRenderer;

const HELP: &str = "1-3/click select  u upload  v/d switch page  q quit";
const UPLOAD_LABEL: &str = "[ Upload Media ]";

/// Main application struct for the terminal preview
pub struct TerminalApp {
    page: Page,
    screen: Rc<RefCell<AsciiRenderer>>,
    layout: Option<Layout>,
    surfaces: Vec<RenderSurface<TermHost>>,
    hovered: Option<usize>,
    sink: LogUploadSink,
    status: String,
    running: bool,
    started: Instant,
    target_frame_time: Duration,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(route: Route, fps: u32) -> Result<Self> {
        let (width, height) = terminal::size()?;
        Self::with_size(route, fps, width as usize, height as usize)
    }

    /// Build the app for a screen of `cols` x `rows` cells without touching the terminal
    pub fn with_size(route: Route, fps: u32, cols: usize, rows: usize) -> Result<Self> {
        let mut app = Self {
            page: Page::new(route),
            screen: Rc::new(RefCell::new(AsciiRenderer::new(cols, rows))),
            layout: None,
            surfaces: Vec::new(),
            hovered: None,
            sink: LogUploadSink,
            status: String::new(),
            running: true,
            started: Instant::now(),
            target_frame_time: Duration::from_millis(1000 / u64::from(fps.max(1))),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        };
        app.resize(cols, rows)?;
        Ok(app)
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn surfaces(&self) -> &[RenderSurface<TermHost>] {
        &self.surfaces
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn screen(&self) -> Rc<RefCell<AsciiRenderer>> {
        Rc::clone(&self.screen)
    }

    /// Recompute the layout and remount every surface
    pub fn resize(&mut self, cols: usize, rows: usize) -> Result<()> {
        self.unmount_surfaces();
        *self.screen.borrow_mut() = AsciiRenderer::new(cols, rows);
        self.layout = Layout::compute(cols, rows);
        self.mount_surfaces()
    }

    /// Leave the current page and start a fresh one
    pub fn navigate(&mut self, route: Route) -> Result<()> {
        self.unmount_surfaces();
        self.page = Page::new(route);
        self.status.clear();
        info!("navigated to {}", route.path());
        self.mount_surfaces()
    }

    fn unmount_surfaces(&mut self) {
        self.hovered = None;
        self.surfaces.clear();
    }

    fn mount_surfaces(&mut self) -> Result<()> {
        for cube in self.page.cubes() {
            let host = TermHost::new(Rc::clone(&self.screen));
            // Without a layout there is nowhere to mount; the surface stays dormant
            let region = self.layout.map(|layout| layout.cubes[cube.index()]);
            if let Some(surface) = RenderSurface::mount(host, region, SurfaceConfig::default())? {
                self.surfaces.push(surface);
            }
        }
        debug!("{} surfaces mounted", self.surfaces.len());
        Ok(())
    }

    pub fn click(&mut self, cube: CubeId) {
        self.page.select(cube);
        self.status = format!("Selected cube {cube}");
    }

    pub fn upload(&mut self) {
        self.status = match self.page.upload(&mut self.sink) {
            Ok(intent) => format!("Upload intent recorded for cube {}", intent.cube),
            Err(err) => format!("Upload ignored: {err}"),
        };
    }

    /// Route a pointer position to the surfaces as enter/leave transitions
    pub fn pointer_moved(&mut self, col: usize, row: usize) {
        let over = self.surfaces.iter().position(|s| s.host().hit(col, row));
        if over == self.hovered {
            return;
        }
        if let Some(previous) = self.hovered.and_then(|i| self.surfaces.get_mut(i)) {
            previous.pointer_leave();
        }
        if let Some(current) = over.and_then(|i| self.surfaces.get_mut(i)) {
            current.pointer_enter();
        }
        self.hovered = over;
    }

    /// Fire every surface whose frame is due
    pub fn tick(&mut self, now_ms: f64) -> Result<()> {
        for surface in &mut self.surfaces {
            if surface.host().frame_due() {
                surface.on_frame(now_ms)?;
            }
        }
        Ok(())
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        self.unmount_surfaces();
        execute!(
            stdout(),
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(event)?;
            }

            // Update
            let now_ms = self.started.elapsed().as_secs_f64() * 1000.0;
            self.tick(now_ms)?;

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.target_frame_time {
                std::thread::sleep(self.target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(code)?,
            Event::Mouse(MouseEvent {
                kind, column, row, ..
            }) => {
                let (col, row) = (column as usize, row as usize);
                match kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => self.pointer_moved(col, row),
                    MouseEventKind::Down(MouseButton::Left) => {
                        self.pointer_moved(col, row);
                        self.handle_click(col, row);
                    }
                    _ => {}
                }
            }
            Event::Resize(cols, rows) => self.resize(cols as usize, rows as usize)?,
            _ => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<()> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char(c @ '1'..='3') => {
                if let Some(cube) = c.to_digit(10).and_then(|d| CubeId::new(d as u8).ok()) {
                    self.click(cube);
                }
            }
            KeyCode::Char('u') => self.upload(),
            KeyCode::Char('v') => self.navigate(Route::Viewer)?,
            KeyCode::Char('d') => self.navigate(Route::Developer)?,
            _ => {}
        }
        Ok(())
    }

    fn handle_click(&mut self, col: usize, row: usize) {
        let Some(layout) = self.layout else {
            return;
        };
        if let Some(cube) = layout.cube_at(col, row) {
            self.click(cube);
        } else if self.page.upload_action_visible()
            && row == layout.media_row + 2
            && col < UPLOAD_LABEL.len()
        {
            self.upload();
        }
    }

    /// Write the page text (title, media panel, status) over the cubes
    pub fn compose_overlay(&mut self) {
        let mut screen = self.screen.borrow_mut();
        let width = screen.width();

        let title = format!(
            "{} | {} | FPS: {:.1} | {}",
            self.page.head().title,
            self.page.route().path(),
            self.fps,
            HELP
        );
        screen.clear_region(Viewport::new(0, 0, width, 1));
        screen.put_str(0, 0, &title, Color::Yellow);

        let Some(layout) = self.layout else {
            screen.put_str(0, 1, "Terminal too small for three cubes", Color::Red);
            return;
        };

        screen.clear_region(Viewport::new(0, 1, width, 1));
        screen.put_str(layout.cubes[0].x, 1, self.page.heading(), Color::White);

        let footer = Viewport::new(0, layout.media_row, width, layout.rows - layout.media_row);
        screen.clear_region(footer);
        if let Some(panel) = self.page.media_panel() {
            screen.put_str(0, layout.media_row, &panel.heading, Color::White);
            let image = format!(
                "[image {}x{}] {} ({})",
                panel.width, panel.height, panel.src, panel.alt
            );
            screen.put_str(0, layout.media_row + 1, &image, Color::Grey);
            if self.page.upload_action_visible() {
                screen.put_str(0, layout.media_row + 2, UPLOAD_LABEL, Color::Blue);
            }
        }
        screen.put_str(0, layout.status_row, &self.status, Color::DarkGrey);
    }

    fn render(&mut self) -> Result<()> {
        self.compose_overlay();

        let mut stdout = stdout();
        self.screen.borrow().draw(&mut stdout)?;
        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube_core::Selection;

    fn cube(n: u8) -> CubeId {
        CubeId::new(n).unwrap()
    }

    #[test]
    fn test_mounts_three_surfaces() {
        let app = TerminalApp::with_size(Route::Viewer, 30, 120, 40).unwrap();
        assert_eq!(app.surfaces().len(), 3);
        assert!(app.surfaces().iter().all(|s| s.host().frame_due()));
    }

    #[test]
    fn test_small_terminal_mounts_nothing() {
        let app = TerminalApp::with_size(Route::Viewer, 30, 20, 10).unwrap();
        assert!(app.layout().is_none());
        assert!(app.surfaces().is_empty());
    }

    #[test]
    fn test_clicking_a_cube_selects_it() {
        let mut app = TerminalApp::with_size(Route::Viewer, 30, 120, 40).unwrap();
        let second = app.layout().unwrap().cubes[1];

        app.handle_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: second.x as u16 + 1,
            row: second.y as u16 + 1,
            modifiers: event::KeyModifiers::NONE,
        }))
        .unwrap();

        assert_eq!(app.page().selection(), Selection::Selected(cube(2)));
        let panel = app.page().media_panel().unwrap();
        assert_eq!(panel.alt, "Media for Cube 2");
    }

    #[test]
    fn test_hover_follows_pointer() {
        let mut app = TerminalApp::with_size(Route::Viewer, 30, 120, 40).unwrap();
        let first = app.layout().unwrap().cubes[0];
        let third = app.layout().unwrap().cubes[2];

        app.pointer_moved(first.x, first.y);
        app.pointer_moved(third.x, third.y);
        app.tick(0.0).unwrap();
        app.tick(400.0).unwrap();

        let scales: Vec<f32> = app
            .surfaces()
            .iter()
            .map(|s| s.scene().transform().scale().x)
            .collect();
        assert!((scales[0] - 1.0).abs() < 1e-5);
        assert!((scales[1] - 1.0).abs() < 1e-5);
        assert!((scales[2] - 1.2).abs() < 1e-5);
    }

    #[test]
    fn test_upload_on_developer_page() {
        let mut app = TerminalApp::with_size(Route::Developer, 30, 120, 40).unwrap();
        app.handle_key(KeyCode::Char('u')).unwrap();
        assert_eq!(app.status(), "Upload ignored: no cube is selected");

        app.handle_key(KeyCode::Char('3')).unwrap();
        app.handle_key(KeyCode::Char('u')).unwrap();
        assert_eq!(app.status(), "Upload intent recorded for cube 3");
        assert_eq!(app.page().selection(), Selection::Selected(cube(3)));
    }

    #[test]
    fn test_navigation_resets_selection_and_remounts() {
        let mut app = TerminalApp::with_size(Route::Viewer, 30, 120, 40).unwrap();
        app.click(cube(1));
        app.handle_key(KeyCode::Char('d')).unwrap();

        assert_eq!(app.page().route(), Route::Developer);
        assert_eq!(app.page().selection(), Selection::Unselected);
        assert_eq!(app.surfaces().len(), 3);
    }

    #[test]
    fn test_overlay_shows_media_panel() {
        let mut app = TerminalApp::with_size(Route::Developer, 30, 120, 40).unwrap();
        app.click(cube(2));
        app.compose_overlay();

        let layout = *app.layout().unwrap();
        let screen = app.screen();
        let screen = screen.borrow();
        let line: String = (0..16)
            .filter_map(|x| screen.char_at(x, layout.media_row))
            .collect();
        assert_eq!(line, "Media for Cube 2");
        assert_eq!(screen.char_at(0, layout.media_row + 2), Some('['));
    }
}
