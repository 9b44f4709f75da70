// SPDX-License-Identifier: MPL-2.0
//! Plain-text presenter for the terminal front-end.

use std::io::Write;

use crate::application::port::{DeckView, Presenter, ScrubDirection};
use crate::domain::cover::CoverSlot;

/// Prints one line per visible change. Rotation alone is not a change.
pub struct TerminalPresenter<W> {
    out: W,
    last: Option<DeckView>,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    #[must_use]
    pub fn render(view: &DeckView) -> String {
        let state = if view.playing { "▶" } else { "⏸" };
        let cover = match view.cover {
            CoverSlot::BuiltIn(i) => format!("cd{}", i + 1),
            CoverSlot::Custom => "custom".to_string(),
        };
        let mut line = format!("[{state} {:>5.1}° {cover}]", view.rotation_degrees);
        match view.scrub {
            ScrubDirection::Forward => line.push_str(" scrubbing"),
            ScrubDirection::Rewind => line.push_str(" rewinding"),
            ScrubDirection::Still if view.dragging => line.push_str(" holding"),
            ScrubDirection::Still => {}
        }
        if !view.title.is_empty() {
            line.push(' ');
            line.push_str(&view.title);
        }
        if !view.status.is_empty() {
            line.push_str(" | ");
            line.push_str(&view.status);
        }
        line
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn present(&mut self, view: &DeckView) {
        if self
            .last
            .as_ref()
            .is_some_and(|last| !last.differs_in_text(view))
        {
            return;
        }
        if let Err(err) = writeln!(self.out, "{}", Self::render(view)) {
            log::debug!("Could not write view: {err}");
        }
        self.last = Some(view.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> DeckView {
        DeckView {
            status: "0:05 / 2:00".to_string(),
            title: "Mondays Thoughts".to_string(),
            playing: true,
            ..DeckView::default()
        }
    }

    #[test]
    fn renders_title_and_status() {
        let line = TerminalPresenter::<Vec<u8>>::render(&view());
        assert_eq!(line, "[▶   0.0° cd1] Mondays Thoughts | 0:05 / 2:00");
    }

    #[test]
    fn rotation_only_changes_are_not_printed() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.present(&view());
        presenter.present(&DeckView {
            rotation_degrees: 42.0,
            ..view()
        });
        presenter.present(&DeckView {
            scrub: ScrubDirection::Rewind,
            dragging: true,
            ..view()
        });

        let printed = String::from_utf8(presenter.out).unwrap();
        let lines: Vec<_> = printed.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("rewinding"));
    }
}
