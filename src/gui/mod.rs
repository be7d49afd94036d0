pub mod app;
pub mod search;

pub use app::GuiApp;

use crate::session::Session;

/// Entry point: launch the native window for `session`
pub fn run(session: Session) -> crate::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("searchfield")
            .with_inner_size([720.0, 560.0])
            .with_min_inner_size([420.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "searchfield",
        native_options,
        Box::new(|cc| Ok(Box::new(GuiApp::new(cc, session)))),
    )
    .map_err(|e| crate::SearchFieldError::GuiError(e.to_string()))
}
