//! Last-resort preview window, drawn in the terminal.
//!
//! Shows the file's name, location, size and kind, then blocks until the user
//! dismisses it. Contents are never rendered.

use std::io::IsTerminal;
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use ratatui::{DefaultTerminal, Frame};
use tracing::warn;

use crate::error::PreviewError;
use crate::path::ResolvedPath;

/// Why the window closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    /// Esc, Enter, Space or `q`.
    Cancelled,
    /// Ctrl-C, the terminal's equivalent of closing the window.
    Closed,
}

/// What the window shows about a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDetails {
    name: String,
    location: String,
    size: Option<u64>,
    kind: &'static str,
}

impl FileDetails {
    /// Gather details for `path`. Metadata errors leave the size unknown.
    pub fn read(path: &ResolvedPath) -> Self {
        let meta = std::fs::metadata(&path.path).ok();
        let kind = match &meta {
            Some(m) if m.is_dir() => "Folder",
            Some(m) if m.is_file() => "File",
            Some(_) => "Other",
            None => "Unknown",
        };
        Self {
            name: path.file_name().to_string(),
            location: path
                .path
                .parent()
                .map_or_else(|| path.as_str().to_string(), |p| p.display().to_string()),
            size: meta.filter(std::fs::Metadata::is_file).map(|m| m.len()),
            kind,
        }
    }

    fn extension(&self) -> Option<&str> {
        Path::new(&self.name).extension().and_then(|e| e.to_str())
    }
}

/// Show the window for `path` and block until it is dismissed.
///
/// Fails with [`PreviewError::WindowUnavailable`] when there is no terminal
/// to draw in.
pub fn show(path: &ResolvedPath, fullscreen: bool) -> Result<Dismissal, PreviewError> {
    if !std::io::stdout().is_terminal() {
        return Err(PreviewError::WindowUnavailable {
            message: "stdout is not a terminal".to_string(),
        });
    }

    let details = FileDetails::read(path);
    let mut terminal = ratatui::try_init().map_err(unavailable)?;
    let result = run(&mut terminal, &details, fullscreen);
    if let Err(e) = ratatui::try_restore() {
        warn!(event = "window.restore_failed", error = %e);
    }
    result.map_err(unavailable)
}

fn unavailable(e: std::io::Error) -> PreviewError {
    PreviewError::WindowUnavailable {
        message: e.to_string(),
    }
}

fn run(
    terminal: &mut DefaultTerminal,
    details: &FileDetails,
    fullscreen: bool,
) -> std::io::Result<Dismissal> {
    loop {
        terminal.draw(|frame| render(frame, details, fullscreen))?;
        if let Event::Key(key) = event::read()? {
            if let Some(dismissal) = dismissal_for(key) {
                return Ok(dismissal);
            }
        }
    }
}

/// Map a key press to a dismissal, if it is one.
pub(crate) fn dismissal_for(key: KeyEvent) -> Option<Dismissal> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Dismissal::Closed)
        }
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ' | 'q') => Some(Dismissal::Cancelled),
        _ => None,
    }
}

fn render(frame: &mut Frame, details: &FileDetails, fullscreen: bool) {
    let area = if fullscreen {
        frame.area()
    } else {
        centered_rect(60, 40, frame.area())
    };

    let label = Style::new().add_modifier(Modifier::DIM);
    let field = |name: &'static str, value: String| {
        Line::from(vec![Span::styled(format!("{name:<10}"), label), Span::raw(value)])
    };

    let mut lines = vec![
        Line::from(Span::styled(
            details.name.clone(),
            Style::new().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        field("Kind", details.kind.to_string()),
        field("Location", details.location.clone()),
    ];
    if let Some(size) = details.size {
        lines.push(field("Size", format_size(size)));
    }
    if let Some(ext) = details.extension() {
        lines.push(field("Type", format!(".{ext}")));
    }

    let block = Block::bordered()
        .title(" Preview ")
        .title_bottom(Line::from(" Esc to close ").right_aligned());

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// Human-readable byte count, binary units.
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64 / 1024.0;
    let mut unit = UNITS[0];
    for &next in &UNITS[1..] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{value:.1} {unit}")
}
