pub mod app;
pub mod colors;
pub mod list;
pub mod search;
pub mod ui;

use crate::session::Session;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

/// Entry point: run the search page in the terminal until the user quits
pub fn run(session: Session) -> crate::Result<()> {
    let mut terminal = ratatui::try_init()?;
    let _ = execute!(std::io::stdout(), EnableMouseCapture);

    let mut app = app::App::new(session);
    let result = app.run(&mut terminal);

    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}
