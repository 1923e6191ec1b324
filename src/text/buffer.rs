// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Gap buffer implementation for plain text editing.
//!
//! A gap buffer maintains a contiguous array with a "gap" of unused space
//! at the caret position. This allows O(1) insertion and deletion at the
//! caret, with O(n) worst-case for moving the gap. Lines are separated by
//! `'\n'`, which is stored like any other character.
//!
//! The buffer also keeps the index at which every line starts, so line
//! lookups and caret positions never rescan the whole text.

use std::ops::Range;

use crate::layout::Line;

/// Filler for unused gap slots
const GAP_FILL: char = '\0';

/// A gap buffer of characters with a logical caret.
///
/// Layout: [text before gap] [gap] [text after gap]
///         ^                 ^     ^
///         0            gap_start  gap_end
///
/// Invariants:
/// - 0 <= gap_start <= gap_end <= buffer.len()
/// - caret is the logical position (0..=len())
/// - line_starts[0] == 0, and every other entry follows a `'\n'`
#[derive(Debug, Clone)]
pub struct TextBuffer {
    /// The underlying storage (includes gap)
    buffer: Vec<char>,
    /// Start of the gap (inclusive)
    gap_start: usize,
    /// End of the gap (exclusive)
    gap_end: usize,
    /// Logical caret position (where insertions occur)
    caret: usize,
    /// Column the caret tries to keep when moving vertically
    preferred_column: Option<usize>,
    /// Character index at which each line starts, kept current on edits
    line_starts: Vec<usize>,
}

impl TextBuffer {
    /// Initial gap size when creating a new buffer
    const INITIAL_GAP_SIZE: usize = 64;
    /// Minimum gap size to maintain after growth
    const MIN_GAP_SIZE: usize = 64;

    /// Create a new empty buffer.
    pub fn new() -> Self {
        Self {
            buffer: vec![GAP_FILL; Self::INITIAL_GAP_SIZE],
            gap_start: 0,
            gap_end: Self::INITIAL_GAP_SIZE,
            caret: 0,
            preferred_column: None,
            line_starts: vec![0],
        }
    }

    /// Create a buffer holding `text` with the caret at the start.
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set_text(text);
        buffer
    }

    /// Number of characters (excluding the gap).
    pub fn len(&self) -> usize {
        self.buffer.len() - self.gap_size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current caret position as a character index.
    pub fn caret(&self) -> usize {
        self.caret
    }

    fn gap_size(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// Move the gap to the specified position.
    ///
    /// Moving the gap has O(k) complexity where k is the distance moved.
    fn move_gap_to(&mut self, position: usize) {
        if position == self.gap_start {
            return;
        }

        if position < self.gap_start {
            // [pos..gap_start] -> [gap_end-count..gap_end]
            let move_count = self.gap_start - position;
            self.buffer
                .copy_within(position..self.gap_start, self.gap_end - move_count);
            self.gap_end -= move_count;
            self.gap_start = position;
        } else {
            // [gap_end..gap_end+count] -> [gap_start..pos]
            let move_count = position - self.gap_start;
            self.buffer
                .copy_within(self.gap_end..self.gap_end + move_count, self.gap_start);
            self.gap_start += move_count;
            self.gap_end += move_count;
        }
    }

    /// Grow the gap so at least `needed` more characters fit.
    fn grow_gap(&mut self, needed: usize) {
        let old_len = self.buffer.len();
        let new_capacity = (old_len * 2).max(old_len + needed + Self::MIN_GAP_SIZE);
        let after_gap = old_len - self.gap_end;

        self.buffer.resize(new_capacity, GAP_FILL);
        let new_gap_end = new_capacity - after_gap;
        self.buffer
            .copy_within(self.gap_end..self.gap_end + after_gap, new_gap_end);
        self.gap_end = new_gap_end;
    }

    /// Insert a character at the caret.
    pub fn insert(&mut self, ch: char) {
        let position = self.caret;
        self.insert_unindexed(ch);
        self.index_inserted(position, ch);
    }

    /// Insert a string at the caret, leaving the caret after it.
    pub fn insert_str(&mut self, text: &str) {
        let count = text.chars().count();
        if self.gap_size() < count {
            self.grow_gap(count);
        }
        for ch in text.chars() {
            self.insert_unindexed(ch);
        }
        self.reindex();
    }

    fn insert_unindexed(&mut self, ch: char) {
        if self.gap_size() == 0 {
            self.grow_gap(1);
        }
        self.move_gap_to(self.caret);

        self.buffer[self.gap_start] = ch;
        self.gap_start += 1;
        self.caret += 1;
        self.preferred_column = None;
    }

    /// Delete the character before the caret (backspace).
    pub fn delete(&mut self) -> Option<char> {
        if self.caret == 0 {
            return None;
        }
        self.move_gap_to(self.caret);

        self.gap_start -= 1;
        self.caret -= 1;
        self.preferred_column = None;
        let deleted = self.buffer[self.gap_start];
        self.index_removed(self.caret, deleted);
        Some(deleted)
    }

    /// Delete the character at the caret (delete key).
    pub fn delete_forward(&mut self) -> Option<char> {
        if self.caret >= self.len() {
            return None;
        }
        self.move_gap_to(self.caret);

        let deleted = self.buffer[self.gap_end];
        self.gap_end += 1;
        self.preferred_column = None;
        self.index_removed(self.caret, deleted);
        Some(deleted)
    }

    // ===== Line index =====

    /// Shift the line index after `ch` was inserted at `position`.
    fn index_inserted(&mut self, position: usize, ch: char) {
        let split = self.line_starts.partition_point(|&start| start <= position);
        for start in &mut self.line_starts[split..] {
            *start += 1;
        }
        if ch == '\n' {
            self.line_starts.insert(split, position + 1);
        }
    }

    /// Shift the line index after `ch` was removed from `position`.
    fn index_removed(&mut self, position: usize, ch: char) {
        let split = self.line_starts.partition_point(|&start| start <= position);
        if ch == '\n' {
            // The line that started right after the newline is gone
            self.line_starts.remove(split);
        }
        for start in &mut self.line_starts[split..] {
            *start -= 1;
        }
    }

    /// Rebuild the line index from scratch.
    fn reindex(&mut self) {
        let starts = std::iter::once(0)
            .chain(
                self.iter()
                    .enumerate()
                    .filter(|&(_, ch)| ch == '\n')
                    .map(|(i, _)| i + 1),
            )
            .collect();
        self.line_starts = starts;
    }

    /// Character at a logical index.
    pub fn get(&self, index: usize) -> Option<char> {
        if index >= self.len() {
            return None;
        }
        let physical = if index < self.gap_start {
            index
        } else {
            index + self.gap_size()
        };
        self.buffer.get(physical).copied()
    }

    /// Iterate over all characters (skipping the gap).
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.buffer[..self.gap_start]
            .iter()
            .chain(&self.buffer[self.gap_end..])
            .copied()
    }

    /// Full text content.
    pub fn text(&self) -> String {
        self.iter().collect()
    }

    /// Replace the whole content and put the caret at the start.
    pub fn set_text(&mut self, text: &str) {
        self.gap_start = 0;
        self.gap_end = self.buffer.len();
        self.caret = 0;
        self.preferred_column = None;
        self.insert_str(text);
        self.caret = 0;
    }

    /// Split the content into lines. A trailing newline yields a final
    /// empty line, so an empty buffer still has one line.
    pub fn lines(&self) -> Vec<Line> {
        (0..self.line_count())
            .filter_map(|id| self.line(id))
            .collect()
    }

    /// The line at index `id`, without its newline.
    pub fn line(&self, id: usize) -> Option<Line> {
        let range = self.line_range(id)?;
        Some(Line {
            id,
            chars: range.filter_map(|index| self.get(index)).collect(),
        })
    }

    /// Character range of line `id`, excluding its newline.
    pub fn line_range(&self, id: usize) -> Option<Range<usize>> {
        let start = *self.line_starts.get(id)?;
        let end = self
            .line_starts
            .get(id + 1)
            .map_or(self.len(), |&next| next - 1);
        Some(start..end)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Caret position as `(line index, column)`.
    pub fn caret_line_position(&self) -> (usize, usize) {
        let line = self
            .line_starts
            .partition_point(|&start| start <= self.caret)
            - 1;
        (line, self.caret - self.line_starts[line])
    }

    /// Move the caret to `(line, column)`, clamping both.
    pub fn set_caret_line_position(&mut self, line: usize, column: usize) {
        let line = line.min(self.line_count() - 1);
        if let Some(range) = self.line_range(line) {
            self.caret = range.start.saturating_add(column).min(range.end);
        }
    }

    /// Set the caret to a character index, clamped to `0..=len()`.
    pub fn set_caret(&mut self, position: usize) {
        self.caret = position.min(self.len());
        self.preferred_column = None;
    }

    pub fn move_caret_left(&mut self) {
        self.set_caret(self.caret.saturating_sub(1));
    }

    pub fn move_caret_right(&mut self) {
        self.set_caret(self.caret + 1);
    }

    pub fn move_caret_up(&mut self) {
        self.move_caret_vertically(-1);
    }

    pub fn move_caret_down(&mut self) {
        self.move_caret_vertically(1);
    }

    fn move_caret_vertically(&mut self, delta: isize) {
        let (line, column) = self.caret_line_position();
        let preferred = *self.preferred_column.get_or_insert(column);
        let Some(target) = line.checked_add_signed(delta) else {
            self.caret = 0;
            return;
        };
        if target >= self.line_count() {
            self.caret = self.len();
            return;
        }
        self.set_caret_line_position(target, preferred);
    }

    pub fn move_caret_home(&mut self) {
        let (line, _) = self.caret_line_position();
        self.set_caret_line_position(line, 0);
        self.preferred_column = None;
    }

    pub fn move_caret_end(&mut self) {
        let (line, _) = self.caret_line_position();
        self.set_caret_line_position(line, usize::MAX);
        self.preferred_column = None;
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}
