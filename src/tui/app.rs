use crate::controller::{Handled, ViewMode};
use crate::page::ElementId;
use crate::session::Session;
use crate::tui::list::ListState;
use crate::tui::search::FieldEditor;
use crate::tui::ui;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::prelude::*;
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};

/// Screen regions that react to mouse clicks, filled in while drawing
#[derive(Debug, Default)]
pub struct Hitboxes {
    pub search_bar: Option<Rect>,
    pub clear_button: Option<Rect>,
    pub links: Vec<(Rect, ElementId)>,
}

pub struct App {
    pub session: Session,
    pub editor: FieldEditor,
    pub list: ListState,
    pub hitboxes: Hitboxes,
    pub status_message: String,
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(mut session: Session) -> Self {
        let _ = session.focus_field();
        let mut editor = FieldEditor::default();
        if let Ok(query) = session.query() {
            editor.cursor_pos = query.len();
        }
        let count = session.links().len();

        Self {
            session,
            editor,
            list: ListState::default(),
            hitboxes: Hitboxes::default(),
            status_message: format!("{} results", count),
            spinner_frame: 0,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> crate::Result<()> {
        let tick_rate = Duration::from_millis(80);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).unwrap_or(false) {
                match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Ok(Event::Mouse(mouse)) => self.handle_mouse(mouse),
                    _ => {}
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.spinner_frame = self.spinner_frame.wrapping_add(1);
                last_tick = Instant::now();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.session.controller().view_mode() == ViewMode::Loading
    }

    pub fn field_focused(&self) -> bool {
        self.session.field_focused()
    }

    /// Record the outcome of a page event in the status line
    fn report(&mut self, outcome: crate::Result<Handled>) {
        match outcome {
            Ok(Handled::Navigate { href, .. }) => {
                self.status_message = format!("Opening {}", href.unwrap_or_default());
            }
            Ok(_) => {}
            Err(e) => self.status_message = format!("Error: {}", e),
        }
    }

    fn clear_field(&mut self) {
        let outcome = self.session.click_clear();
        self.report(outcome);
        self.editor.cursor_pos = 0;
    }

    fn activate_selected(&mut self) {
        let links = self.session.links();
        if let Some(&link) = self.list.selected.and_then(|i| links.get(i)) {
            let outcome = self.session.click(link);
            self.report(outcome);
        }
    }

    fn focus_field(&mut self) {
        if let Err(e) = self.session.focus_field() {
            self.status_message = format!("Error: {}", e);
        }
    }

    fn focus_results(&mut self) {
        let links = self.session.links();
        if links.is_empty() {
            return;
        }
        if self.list.selected.is_none() {
            self.list.select_first(links.len());
        }
        if let Some(&link) = self.list.selected.and_then(|i| links.get(i)) {
            let _ = self.session.focus(link);
        }
    }

    /// Move the page focus along with the list selection
    fn sync_focus(&mut self) {
        let links = self.session.links();
        if let Some(&link) = self.list.selected.and_then(|i| links.get(i)) {
            let _ = self.session.focus(link);
        }
    }

    fn edit_field(&mut self, key: KeyEvent) {
        let mut text = match self.session.query() {
            Ok(query) => query.to_string(),
            Err(e) => {
                self.status_message = format!("Error: {}", e);
                return;
            }
        };
        if self.editor.apply(key, &mut text) {
            let outcome = self.session.set_query(&text);
            self.report(outcome);
        }
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        // Nothing but quitting once a result is loading
        if self.is_loading() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                self.should_quit = true;
            }
            return;
        }

        if key.code == KeyCode::Esc {
            let has_text = self.session.query().map(|q| !q.is_empty()).unwrap_or(false);
            if self.field_focused() && has_text {
                self.clear_field();
            } else if self.field_focused() {
                self.focus_results();
            } else {
                self.should_quit = true;
            }
            return;
        }

        if self.field_focused() {
            self.handle_field_key(key);
        } else {
            self.handle_list_key(key);
        }
    }

    fn handle_field_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => self.focus_results(),
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => self.clear_field(),
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => {}
            _ => self.edit_field(key),
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        let total = self.session.links().len();
        self.list.clamp(total);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_next(total),
            KeyCode::PageUp => self.list.page_up(),
            KeyCode::PageDown => self.list.page_down(total),
            KeyCode::Home => self.list.select_first(total),
            KeyCode::End => self.list.select_last(total),
            KeyCode::Enter => {
                self.activate_selected();
                return;
            }
            KeyCode::Tab | KeyCode::Char('/') => {
                self.focus_field();
                return;
            }

            // Any other printable char focuses the field and types it
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.focus_field();
                if let Ok(query) = self.session.query() {
                    self.editor.cursor_pos = query.len();
                }
                self.edit_field(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
                return;
            }

            _ => return,
        }
        self.sync_focus();
    }

    // --- Mouse handling ---

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || self.is_loading() {
            return;
        }
        let at = Position::new(mouse.column, mouse.row);

        if self.hitboxes.clear_button.is_some_and(|r| r.contains(at)) {
            self.clear_field();
            return;
        }

        let hit = self
            .hitboxes
            .links
            .iter()
            .find(|(r, _)| r.contains(at))
            .map(|&(_, link)| link);
        if let Some(link) = hit {
            if let Some(index) = self.session.links().iter().position(|&l| l == link) {
                self.list.selected = Some(index);
            }
            let outcome = self.session.click(link);
            self.report(outcome);
            return;
        }

        if self.hitboxes.search_bar.is_some_and(|r| r.contains(at)) {
            self.focus_field();
        }
    }
}
