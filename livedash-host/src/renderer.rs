//! Text-mode renderer
//!
//! Keeps one line of text per widget and can print the whole screen. Used as
//! the display on a host and as the frame source for captures.

use std::fmt::Write as _;

use livedash_core::config::{Color, ConfigError, DashboardModel, Splash};
use livedash_core::traits::{Renderer, WidgetChange};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct WidgetLine {
    id: String,
    title: String,
    text: String,
    /// Arc value (gauges) or permille (rate rows)
    level: i32,
    color: Option<Color>,
}

impl WidgetLine {
    fn stale(id: &str, title: &str, text: &str) -> Self {
        Self {
            id: id.to_owned(),
            title: title.to_owned(),
            text: text.to_owned(),
            level: 0,
            color: None,
        }
    }
}

/// Renders the dashboard as plain text
#[derive(Debug, Default)]
pub struct TextRenderer {
    /// Print each widget change to stdout
    echo: bool,
    title: String,
    background: Option<Color>,
    gauges: Vec<WidgetLine>,
    rows: Vec<WidgetLine>,
    footer: Vec<String>,
    error: Option<String>,
}

impl TextRenderer {
    pub fn new(echo: bool) -> Self {
        Self {
            echo,
            ..Default::default()
        }
    }

    /// Last configuration error shown, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The whole screen as text
    pub fn snapshot(&self) -> String {
        let mut out = String::new();
        if let Some(error) = &self.error {
            out.push_str(error);
            return out;
        }

        let _ = writeln!(out, "== {} ==", self.title);
        if let Some(bg) = self.background {
            let _ = writeln!(out, "background {bg}");
        }
        for line in &self.gauges {
            let _ = writeln!(out, "{}", format_line(line, ""));
        }
        for line in &self.rows {
            let _ = writeln!(out, "{}", format_line(line, "\u{2030}"));
        }
        for line in &self.footer {
            let _ = writeln!(out, "{line}");
        }
        out
    }

    fn echo(&self, line: &WidgetLine, unit: &str) {
        if self.echo {
            println!("{}", format_line(line, unit));
        }
    }
}

fn format_line(line: &WidgetLine, unit: &str) -> String {
    match line.color {
        Some(color) => format!(
            "[{}] {}: {} ({}{}) {}",
            line.id, line.title, line.text, line.level, unit, color
        ),
        None => format!("[{}] {}: {} (stale)", line.id, line.title, line.text),
    }
}

impl Renderer for TextRenderer {
    fn show_config_error(&mut self, error: &ConfigError) {
        let screen = format!("CONFIG ERROR\n{error}\n{}\n", error.hint());
        print!("{screen}");
        self.error = Some(screen);
    }

    fn show_splash(&mut self, splash: &Splash, background: Color) -> bool {
        if !std::path::Path::new(splash.path.as_str()).exists() {
            return false;
        }
        println!("[splash {} on {} for {} ms]", splash.path, background, splash.duration_ms);
        true
    }

    fn build(&mut self, model: &DashboardModel) {
        let config = &model.config;
        self.error = None;
        self.title = config.robot_name.to_string();
        self.background = Some(config.ui.background);

        self.gauges = config
            .gauges
            .iter()
            .map(|g| WidgetLine::stale(&g.id, &g.title, &g.stale_text))
            .collect();
        self.rows = config
            .rate_lists
            .iter()
            .flat_map(|list| list.rows.iter())
            .map(|r| WidgetLine::stale(&r.id, &r.label, livedash_core::config::DEFAULT_STALE_TEXT))
            .collect();

        self.footer.clear();
        for button in &config.buttons {
            self.footer
                .push(format!("<{}> {} [{}]", button.action_id, button.label, button.color));
        }
        for tile in &config.text_tiles {
            self.footer.push(format!("{}: {}", tile.title, tile.body));
        }

        if self.echo {
            print!("{}", self.snapshot());
        }
    }

    fn update(&mut self, change: &WidgetChange) {
        let (slot, text, level, color, stale, unit) = match change {
            WidgetChange::Gauge(view) => (
                self.gauges.get_mut(view.index),
                &view.text,
                view.value,
                view.color,
                view.stale,
                "",
            ),
            WidgetChange::RateRow(view) => (
                self.rows.get_mut(view.index),
                &view.text,
                i32::from(view.permille),
                view.color,
                view.stale,
                "\u{2030}",
            ),
        };
        let Some(line) = slot else {
            return;
        };
        line.text = text.to_string();
        line.level = level;
        line.color = (!stale).then_some(color);

        let line = line.clone();
        self.echo(&line, unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use livedash_core::Dashboard;

    const CONFIG: &str = r#"{
        "robot_name": "Rover",
        "ui": { "dark_theme": true, "stale_timeout_ms": 500 },
        "layout": { "cols": 2, "rows": 1, "tiles": [ {"id": "g"}, {"id": "hz"} ] },
        "gauges": [ { "id": "temp", "tile_id": "g", "title": "Temp", "min": 0, "max": 100,
                      "accent": "blue", "stages": [ {"t": 50, "c": "red"} ] } ],
        "hz_lists": [ { "tile_id": "hz", "title": "Rates", "rows": [
            { "id": "cam", "label": "Camera", "target": 30 } ] } ],
        "text_tiles": [ { "tile_id": "g", "title": "Note", "body": "hello" } ]
    }"#;

    #[test]
    fn test_snapshot_tracks_changes() {
        let mut r = TextRenderer::new(false);
        let mut dash = Dashboard::load(CONFIG, &mut r).unwrap();
        dash.present(&mut r, 0);

        let snap = r.snapshot();
        assert!(snap.starts_with("== Rover =="));
        assert!(snap.contains("[temp] Temp: -- (stale)"));
        assert!(snap.contains("[cam] Camera: -- (stale)"));
        assert!(snap.contains("Note: hello"));

        dash.consume(r#"{"id":"temp","text":"72C","value":72}"#, 10, &mut r)
            .unwrap();
        dash.consume(r#"{"id":"cam","text":"15 Hz","value":15}"#, 10, &mut r)
            .unwrap();
        let snap = r.snapshot();
        assert!(snap.contains("[temp] Temp: 72C (72) #F44336"));
        assert!(snap.contains("[cam] Camera: 15 Hz (500\u{2030}) #F44336"));

        dash.tick(511, &mut r);
        assert!(r.snapshot().contains("[temp] Temp: -- (stale)"));
    }

    #[test]
    fn test_config_error_screen() {
        let mut r = TextRenderer::new(false);
        assert!(Dashboard::load("[]", &mut r).is_err());
        let screen = r.error().unwrap();
        assert!(screen.starts_with("CONFIG ERROR\n"));
        assert_eq!(r.snapshot(), screen);
    }
}
