//! TUI model: the Explainer View plus terminal-only state.
//!
//! The input line is the source of truth for the verse reference; every
//! edit is mirrored into the view so a trigger always sees the current
//! input.

use ratatui::layout::Rect;

use super::input_line::InputLine;
use crate::explainer::ExplainerView;

/// Braille spinner shown on the trigger while loading.
pub const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Screen areas from the last frame, for hit-testing and paging.
#[derive(Debug, Default, Clone, Copy)]
pub struct LayoutAreas {
    pub button: Rect,
    pub explanation: Rect,
}

pub struct TuiApp {
    pub view: ExplainerView,
    pub input_line: InputLine,
    pub should_quit: bool,
    /// First visible line of the explanation panel.
    pub scroll: u16,
    /// Largest useful `scroll`, recomputed on every draw.
    pub max_scroll: u16,
    pub spinner_frame: usize,
    pub layout_areas: LayoutAreas,
}

impl TuiApp {
    pub fn new(view: ExplainerView) -> Self {
        let mut input_line = InputLine::new();
        input_line.set_content(&view.state().verse_reference);
        Self {
            view,
            input_line,
            should_quit: false,
            scroll: 0,
            max_scroll: 0,
            spinner_frame: 0,
            layout_areas: LayoutAreas::default(),
        }
    }

    /// Copy the input line into the view's verse reference.
    pub fn sync_input(&mut self) {
        self.view.set_verse_reference(self.input_line.content());
    }

    /// Insert pasted text at the cursor.
    pub fn paste(&mut self, text: &str) {
        self.input_line.insert_str(text);
        self.sync_input();
    }

    /// Press the Explain trigger. Ignored while disabled.
    pub fn trigger(&mut self) {
        self.sync_input();
        if self.view.spawn_explanation() {
            self.spinner_frame = 0;
        }
    }

    /// Abort the in-flight request, if any.
    pub fn cancel(&mut self) {
        self.view.cancel();
    }

    /// Periodic work: advance the spinner and collect a settled request.
    pub fn on_tick(&mut self) {
        if self.view.is_loading() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
        }
        if self.view.poll_settled() {
            self.scroll = 0;
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER[self.spinner_frame % SPINNER.len()]
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll);
    }

    /// Lines per page in the explanation panel (inside its border).
    pub fn page_size(&self) -> u16 {
        self.layout_areas.explanation.height.saturating_sub(2).max(1)
    }
}
