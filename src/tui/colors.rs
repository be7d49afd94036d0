use ratatui::style::Color;

pub const BAR_BG: Color = Color::Rgb(0, 95, 135);
pub const TITLE_BG: Color = Color::Rgb(40, 40, 50);
pub const SELECTED_BG: Color = Color::Rgb(60, 60, 80);

pub const SPINNER: [&str; 10] = [
    "\u{280B}", "\u{2819}", "\u{2839}", "\u{2838}", "\u{283C}", "\u{2834}", "\u{2826}", "\u{2827}",
    "\u{2807}", "\u{280F}",
];

/// Media type segment of a details link (`/details/{id}/{type}/`)
pub fn media_label(href: &str) -> &'static str {
    match href.trim_end_matches('/').rsplit('/').next() {
        Some("Movie") => "Movie",
        Some("TV") => "TV",
        _ => "",
    }
}

pub fn color_for_media(label: &str) -> Color {
    match label {
        "Movie" => Color::LightBlue,
        "TV" => Color::LightMagenta,
        _ => Color::White,
    }
}

pub fn icon_for_media(label: &str) -> &'static str {
    match label {
        "Movie" => "\u{1F3AC}", // clapper board
        "TV" => "\u{1F4FA}",    // television
        _ => "\u{1F4C4}",       // page
    }
}
