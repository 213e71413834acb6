//! Core application state for the interactive search screen

use quicksearch_core::SearchView;

/// Main application state
///
/// The search input is owned here; everything below it (status, results,
/// page strip) mirrors the latest [`SearchView`] published by the pipeline.
#[derive(Debug, Default)]
pub struct App {
    /// Raw search input, exactly as typed
    pub input: String,
    /// Cursor position in `input`, in chars
    pub cursor: usize,
    /// Latest pipeline snapshot
    pub view: SearchView,
    /// Highlighted row on the current page
    pub selected_index: usize,
    /// Should quit
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a new pipeline snapshot, keeping the highlight on the page
    pub fn set_view(&mut self, view: SearchView) {
        if view.page != self.view.page || view.status != self.view.status {
            self.selected_index = 0;
        }
        self.view = view;
        self.selected_index = self
            .selected_index
            .min(self.view.items.len().saturating_sub(1));
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.input
            .char_indices()
            .nth(cursor)
            .map(|(idx, _)| idx)
            .unwrap_or(self.input.len())
    }

    fn char_len(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert a char at the cursor
    pub fn input_insert(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.input.insert(idx, c);
        self.cursor += 1;
    }

    /// Delete char before cursor; false when nothing changed
    pub fn input_backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.input.remove(idx);
        true
    }

    /// Delete char under cursor; false when nothing changed
    pub fn input_delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let idx = self.byte_index(self.cursor);
        self.input.remove(idx);
        true
    }

    /// Clear the whole input; false when it was already empty
    pub fn input_clear(&mut self) -> bool {
        if self.input.is_empty() {
            return false;
        }
        self.input.clear();
        self.cursor = 0;
        true
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Select next row on the current page
    pub fn select_next(&mut self) {
        let len = self.view.items.len();
        if len > 0 {
            self.selected_index = (self.selected_index + 1) % len;
        }
    }

    /// Select previous row on the current page
    pub fn select_prev(&mut self) {
        let len = self.view.items.len();
        if len > 0 {
            self.selected_index = self
                .selected_index
                .checked_sub(1)
                .unwrap_or(len.saturating_sub(1));
        }
    }
}
