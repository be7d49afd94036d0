//! Search page window

use crate::controller::{Handled, ViewMode};
use crate::gui::search::SearchState;
use crate::page::{ElementId, HostPage, Visibility};
use crate::session::Session;
use eframe::egui;

pub struct GuiApp {
    /// Page and controller
    session: Session,
    /// Search field buffer
    search: SearchState,
    /// Status bar message
    status_message: String,
}

impl GuiApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, session: Session) -> Self {
        let query = session.query().unwrap_or_default().to_string();
        let status_message = format!("{} results", session.links().len());
        Self {
            session,
            search: SearchState::new(&query),
            status_message,
        }
    }

    /// Record the outcome of a page event in the status bar
    fn report(&mut self, outcome: crate::Result<Handled>) {
        match outcome {
            Ok(Handled::Navigate { href, .. }) => {
                self.status_message = format!("Opening {}", href.unwrap_or_default());
            }
            Ok(_) => {}
            Err(e) => self.status_message = format!("Error: {}", e),
        }
    }

    fn clear_shown(&self) -> bool {
        self.session
            .controller()
            .clear_visibility(self.session.document())
            .map(Visibility::is_shown)
            .unwrap_or(false)
    }

    /// Render search bar
    fn render_search_bar(&mut self, ctx: &egui::Context) {
        let loading = self.session.controller().view_mode() == ViewMode::Loading;

        egui::TopBottomPanel::top("search_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Search:");
                let response = ui.add_enabled(
                    !loading,
                    egui::TextEdit::singleline(&mut self.search.query)
                        .desired_width(ui.available_width() - 40.0)
                        .hint_text("Movie or TV show title..."),
                );

                if self.search.wants_focus {
                    response.request_focus();
                    self.search.wants_focus = false;
                }

                if response.changed() {
                    let outcome = self.session.set_query(&self.search.query);
                    self.report(outcome);
                }

                if response.has_focus() && !self.session.field_focused() {
                    let _ = self.session.focus_field();
                }

                if self.clear_shown() && ui.add_enabled(!loading, egui::Button::new("\u{2715}")).clicked() {
                    let outcome = self.session.click_clear();
                    self.report(outcome);
                    if let Ok(value) = self.session.query() {
                        self.search.sync(value);
                    }
                    self.search.wants_focus = self.session.field_focused();
                }
            });
        });
    }

    /// Render status bar
    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status_message);
            });
        });
    }

    fn render_results(&mut self, ui: &mut egui::Ui) {
        let links = self.session.links();
        if links.is_empty() {
            ui.weak("No results");
            return;
        }

        let mut clicked: Option<ElementId> = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            let doc = self.session.document();
            for &link in &links {
                let label = doc.text(link).unwrap_or_default();
                let response = ui.link(label);
                let response = match doc.href(link).ok().flatten() {
                    Some(href) => response.on_hover_text(href),
                    None => response,
                };
                if response.clicked() {
                    clicked = Some(link);
                }
            }
        });

        if let Some(link) = clicked {
            let outcome = self.session.click(link);
            self.report(outcome);
        }
    }

    fn render_loading(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.spinner();
            ui.label("Loading...");
            if let Some(href) = self.session.navigation().filter(|h| !h.is_empty()) {
                ui.weak(href);
            }
        });
    }
}

impl eframe::App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_search_bar(ctx);
        self.render_status_bar(ctx);

        let state = self.session.state();
        let (results, loading) = match &state {
            Ok(state) => (state.results.is_shown(), state.loading.is_shown()),
            Err(_) => (false, false),
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            if results {
                self.render_results(ui);
            } else if loading {
                self.render_loading(ui);
                ctx.request_repaint();
            }
        });
    }
}
