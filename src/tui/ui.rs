use crate::page::{HostPage, Visibility};
use crate::tui::app::App;
use crate::tui::colors;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

const SEARCH_PREFIX: &str = " \u{1F50D} ";
const CLEAR_LABEL: &str = "[\u{2715}]";

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(3), // Search bar
            Constraint::Min(3),    // Results or loading
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    app.hitboxes.search_bar = None;
    app.hitboxes.clear_button = None;
    app.hitboxes.links.clear();

    draw_title_bar(frame, chunks[0]);
    draw_search_bar(frame, app, chunks[1]);

    let state = app.session.state();
    match state {
        Ok(state) if state.results.is_shown() => draw_results(frame, app, chunks[2]),
        Ok(state) if state.loading.is_shown() => {
            draw_loading(frame, app, state.navigation.as_deref(), chunks[2])
        }
        _ => {}
    }

    draw_status_bar(frame, app, chunks[3]);

    if app.field_focused() && !app.is_loading() {
        let query = app.session.query().unwrap_or_default();
        // Text does not scroll, so keep the cursor on the last column inside the border
        let last_column = chunks[1].right().saturating_sub(2);
        let cursor_x = chunks[1]
            .x
            .saturating_add(1)
            .saturating_add(SEARCH_PREFIX.width() as u16)
            .saturating_add(app.editor.cursor_column(query))
            .min(last_column);
        let cursor_y = chunks[1].y + 1;
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

fn draw_title_bar(frame: &mut Frame, area: Rect) {
    let title = format!(" searchfield {}", crate::VERSION);
    let line = Line::from(Span::styled(
        format!("{:width$}", title, width = area.width as usize),
        Style::default()
            .fg(Color::White)
            .bg(colors::TITLE_BG)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_search_bar(frame: &mut Frame, app: &mut App, area: Rect) {
    let border_style = if app.field_focused() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Search ");
    let inner = block.inner(area);
    app.hitboxes.search_bar = Some(area);

    let query = app.session.query().unwrap_or_default();
    let paragraph = Paragraph::new(format!("{}{}", SEARCH_PREFIX, query))
        .block(block)
        .style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, area);

    // The clear affordance is drawn only while the page shows it
    let clear_shown = app
        .session
        .controller()
        .clear_visibility(app.session.document())
        .map(Visibility::is_shown)
        .unwrap_or(false);
    let label_width = CLEAR_LABEL.width() as u16;
    if clear_shown && inner.width > label_width {
        let clear_area = Rect::new(inner.right() - label_width, inner.y, label_width, 1);
        frame.render_widget(
            Paragraph::new(CLEAR_LABEL).style(
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            ),
            clear_area,
        );
        app.hitboxes.clear_button = Some(clear_area);
    }
}

fn draw_results(frame: &mut Frame, app: &mut App, area: Rect) {
    let links = app.session.links();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" Results ({}) ", links.len()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if links.is_empty() {
        frame.render_widget(
            Paragraph::new(" No results").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    app.list.visible_rows = inner.height as usize;
    app.list.clamp(links.len());
    let start = app.list.scroll_offset.min(links.len());
    let end = (start + inner.height as usize).min(links.len());
    let doc = app.session.document();

    for (row, index) in (start..end).enumerate() {
        let link = links[index];
        let label = doc.text(link).unwrap_or_default();
        let href = doc.href(link).ok().flatten().unwrap_or_default();
        let media = colors::media_label(href);

        let selected = app.list.selected == Some(index) && !app.field_focused();
        let base = if selected {
            Style::default().bg(colors::SELECTED_BG)
        } else {
            Style::default()
        };

        let line = Line::from(vec![
            Span::styled(format!(" {} ", colors::icon_for_media(media)), base),
            Span::styled(
                label.to_string(),
                base.fg(colors::color_for_media(media)).add_modifier(if selected {
                    Modifier::BOLD | Modifier::UNDERLINED
                } else {
                    Modifier::UNDERLINED
                }),
            ),
            Span::styled(format!("  {}", media), base.fg(Color::DarkGray)),
        ]);

        let row_area = Rect::new(inner.x, inner.y + row as u16, inner.width, 1);
        frame.render_widget(Paragraph::new(line).style(base), row_area);
        app.hitboxes.links.push((row_area, link));
    }
}

fn draw_loading(frame: &mut Frame, app: &App, navigation: Option<&str>, area: Rect) {
    let spinner = colors::SPINNER[app.spinner_frame % colors::SPINNER.len()];
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} Loading...", spinner),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(href) = navigation.filter(|h| !h.is_empty()) {
        lines.push(Line::from(Span::styled(
            href.to_string(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = format!(" {}", app.status_message);
    let right_text = if app.is_loading() {
        " Esc:Quit "
    } else if app.field_focused() {
        " Esc:Clear  Tab:Results  Ctrl+Q:Quit "
    } else {
        " \u{2191}\u{2193}:Select  Enter:Open  Tab:Search  Ctrl+Q:Quit "
    };

    // Build the status line: left-aligned text + padding + right-aligned text
    let available_width = area.width as usize;
    let left_len = left_text.width();
    let right_len = right_text.width();

    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{}{:padding$}{}", left_text, "", right_text, padding = padding)
    } else {
        // Not enough space, just show left text
        format!("{:width$}", left_text, width = available_width)
    };

    let status = Paragraph::new(status_str)
        .style(Style::default().fg(Color::White).bg(colors::BAR_BG));

    frame.render_widget(status, area);
}
