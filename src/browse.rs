//! Step through a batch with the arrow keys, re-previewing each file.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

/// Wrapping cursor over a non-empty list of files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    index: usize,
}

impl Carousel {
    /// A cursor at the first of `len` items, or `None` for an empty list.
    pub const fn new(len: usize) -> Option<Self> {
        if len == 0 {
            None
        } else {
            Some(Self { len, index: 0 })
        }
    }

    /// Current position.
    pub const fn current(&self) -> usize {
        self.index
    }

    /// Advance, wrapping past the end.
    pub fn next(&mut self) -> usize {
        self.index = (self.index + 1) % self.len;
        self.index
    }

    /// Step back, wrapping before the start.
    pub fn previous(&mut self) -> usize {
        self.index = (self.index + self.len - 1) % self.len;
        self.index
    }
}

/// A navigation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Right or Down.
    Next,
    /// Left or Up.
    Previous,
    /// Esc, `q` or Ctrl-C.
    Quit,
}

/// Map a key press to a navigation step.
pub fn step_for(key: KeyEvent) -> Option<Step> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Right | KeyCode::Down => Some(Step::Next),
        KeyCode::Left | KeyCode::Up => Some(Step::Previous),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Step::Quit),
        KeyCode::Esc | KeyCode::Char('q') => Some(Step::Quit),
        _ => None,
    }
}

struct RawMode;

impl RawMode {
    fn enable() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Read navigation keys until the user quits, calling `select` with the index
/// of each newly selected file. The first file is assumed to be on screen
/// already.
///
/// Raw mode is dropped while `select` runs so its status lines and any
/// built-in window render normally.
pub fn run<F: FnMut(usize)>(len: usize, mut select: F) -> std::io::Result<()> {
    let Some(mut carousel) = Carousel::new(len) else {
        return Ok(());
    };

    eprintln!("Use ←/→ to switch files, Esc or q to quit.");
    loop {
        let step = {
            let _raw = RawMode::enable()?;
            match event::read()? {
                Event::Key(key) => step_for(key),
                _ => None,
            }
        };
        match step {
            Some(Step::Quit) => return Ok(()),
            Some(Step::Next) => select(carousel.next()),
            Some(Step::Previous) => select(carousel.previous()),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carousel_wraps_both_ways() {
        let mut c = Carousel::new(3).unwrap();
        assert_eq!(c.current(), 0);
        assert_eq!(c.previous(), 2);
        assert_eq!(c.next(), 0);
        assert_eq!(c.next(), 1);
        assert_eq!(c.next(), 2);
        assert_eq!(c.next(), 0);
    }

    #[test]
    fn single_item_stays_put() {
        let mut c = Carousel::new(1).unwrap();
        assert_eq!(c.next(), 0);
        assert_eq!(c.previous(), 0);
    }

    #[test]
    fn empty_list_has_no_carousel() {
        assert!(Carousel::new(0).is_none());
    }

    #[test]
    fn arrow_keys_navigate() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(step_for(key(KeyCode::Right)), Some(Step::Next));
        assert_eq!(step_for(key(KeyCode::Down)), Some(Step::Next));
        assert_eq!(step_for(key(KeyCode::Left)), Some(Step::Previous));
        assert_eq!(step_for(key(KeyCode::Up)), Some(Step::Previous));
        assert_eq!(step_for(key(KeyCode::Esc)), Some(Step::Quit));
        assert_eq!(step_for(key(KeyCode::Char('x'))), None);
        assert_eq!(
            step_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Step::Quit)
        );
    }
}
