/// Cube Display in the terminal
///
/// Controls:
///   - Mouse: hover a cube to grow it, click to select it
///   - 1/2/3: Select a cube
///   - U: Upload media for the selected cube (developer page)
///   - V/D: Switch to the viewer or developer page
///   - Q/ESC: Quit
use anyhow::Result;
use clap::Parser;
use cube_core::Route;
use cube_terminal::TerminalApp;
use log::info;

#[derive(Parser, Debug)]
#[command(version, about = "Three rotating wireframe cubes in the terminal")]
struct Args {
    /// Page to open: `viewer`, `developer`, or a path such as `/developer`
    #[arg(long, default_value = "viewer")]
    page: Route,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    info!("starting on {} at {} fps", args.page.path(), args.fps);

    let mut app = TerminalApp::new(args.page, args.fps)?;
    app.run()
}
