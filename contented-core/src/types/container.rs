//! Container model: the loaded slice of one server-side directory.

use std::collections::HashMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use contented_client::{Content, ContainerSummary};

/// Window width used when a caller asks for zero visible items.
pub const DEFAULT_VISIBLE: usize = 4;

/// How much of a container's server-side content is in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoadState {
    /// No load has been attempted.
    #[default]
    NotLoaded,
    /// A load is in flight.
    Loading,
    /// A load ran but the container is still short of `total`.
    Partial,
    /// `count == total`.
    Complete,
    /// The server reported fewer items than are already loaded.
    Stale,
}

/// Result of stepping the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    /// The cursor now points at this row.
    Selected(usize),
    /// Stepped past the last loaded item; the caller moves to the next container.
    PastEnd,
    /// Already at the first item; the caller moves to the previous container.
    BeforeStart,
}

/// One directory of content, partially or fully loaded.
///
/// `contents` is always deduplicated by id and sorted by `idx`, and
/// [`count`](Self::count) is its length, so the two can never disagree.
/// None of the methods panic: anchors that are missing, cursors that are out
/// of range and empty containers all resolve to a clamped result.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub id: String,
    pub name: String,
    pub path: String,
    pub description: String,
    pub preview_url: String,
    total: usize,
    contents: Vec<Content>,
    row_idx: usize,
    load_state: LoadState,
}

impl Container {
    /// Empty container with a known server-side total.
    pub fn new(id: impl Into<String>, total: usize) -> Self {
        let mut container = Self {
            id: id.into(),
            total,
            ..Self::default()
        };
        container.set_contents(Vec::new());
        container
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of loaded items.
    pub fn count(&self) -> usize {
        self.contents.len()
    }

    pub fn contents(&self) -> &[Content] {
        &self.contents
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn is_complete(&self) -> bool {
        self.load_state == LoadState::Complete
    }

    /// More items exist on the server than are loaded.
    pub fn has_more(&self) -> bool {
        self.count() < self.total
    }

    pub fn row_idx(&self) -> usize {
        self.row_idx
    }

    /// Move the cursor, clamped to `0..=max(count, total)`.
    ///
    /// The cursor may point past the loaded items of a partially loaded
    /// container; that is the signal to load further.
    pub fn set_row_idx(&mut self, row_idx: usize) {
        self.row_idx = row_idx.min(self.cursor_limit());
    }

    /// Mark a load as started. A complete container stays complete.
    pub fn begin_loading(&mut self) {
        if self.load_state != LoadState::Complete {
            self.load_state = LoadState::Loading;
        }
    }

    /// Mark a load as finished (or abandoned) without further data.
    pub fn end_loading(&mut self) {
        if self.load_state == LoadState::Loading {
            self.load_state = if self.count() == 0 {
                LoadState::NotLoaded
            } else {
                LoadState::Partial
            };
        }
    }

    /// Record the server's latest total.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.reconcile_state();
    }

    /// Replace the loaded set.
    ///
    /// Items are deduplicated by id (the last occurrence wins, so re-sent
    /// records refresh stale fields) and sorted by `idx`, ties broken by id.
    pub fn set_contents(&mut self, contents: Vec<Content>) {
        self.contents = dedupe_sorted(contents);
        if self.load_state == LoadState::Loading {
            self.load_state = LoadState::Partial;
        }
        self.reconcile_state();
    }

    /// Merge a page of items into the loaded set.
    ///
    /// Idempotent and order independent: pages may arrive twice or out of
    /// order and the result is the same.
    pub fn add_contents(&mut self, contents: impl IntoIterator<Item = Content>) {
        let mut merged = std::mem::take(&mut self.contents);
        merged.extend(contents);
        self.set_contents(merged);
    }

    /// Position of `item` (matched by id) in the loaded list.
    pub fn index_of(&self, item: &Content) -> Option<usize> {
        position_in(&self.contents, item)
    }

    /// Index range of the window of `requested_visible` items around `anchor`.
    ///
    /// The window starts `before` items ahead of the anchor (clamped at the
    /// front). When it would run off the end it is shifted back so that it
    /// still holds `requested_visible` items; a list shorter than that is
    /// returned whole. A missing or unknown anchor starts at the first item,
    /// and `requested_visible == 0` means [`DEFAULT_VISIBLE`].
    pub fn interval_range(
        &self,
        anchor: Option<&Content>,
        requested_visible: usize,
        before: usize,
    ) -> Range<usize> {
        let len = self.contents.len();
        let requested = if requested_visible == 0 {
            DEFAULT_VISIBLE
        } else {
            requested_visible
        };
        if requested >= len {
            return 0..len;
        }

        let anchor_pos = anchor.and_then(|a| self.index_of(a)).unwrap_or(0);
        let mut start = anchor_pos.saturating_sub(before);
        let end = start.saturating_add(requested).min(len);
        if end - start < requested {
            start = end.saturating_sub(requested);
        }
        start..end
    }

    /// The visible window around `anchor`, see [`interval_range`](Self::interval_range).
    pub fn interval_around(
        &self,
        anchor: Option<&Content>,
        requested_visible: usize,
        before: usize,
    ) -> &[Content] {
        let range = self.interval_range(anchor, requested_visible, before);
        &self.contents[range]
    }

    /// Item under the cursor, or the first item when the cursor is past the
    /// loaded range.
    pub fn current_content(&self) -> Option<&Content> {
        self.contents
            .get(self.row_idx)
            .or_else(|| self.contents.first())
    }

    pub fn content_at(&self, row_idx: usize) -> Option<&Content> {
        self.contents.get(row_idx)
    }

    /// Point the cursor at `item`. Returns its row, or `None` (cursor
    /// unchanged) when the item is not loaded.
    pub fn select_content(&mut self, item: &Content) -> Option<usize> {
        let row = self.index_of(item)?;
        self.row_idx = row;
        Some(row)
    }

    /// Step the cursor forward.
    pub fn next_content(&mut self) -> CursorMove {
        let len = self.count();
        if self.row_idx >= len {
            return CursorMove::PastEnd;
        }
        self.row_idx += 1;
        if self.row_idx == len {
            CursorMove::PastEnd
        } else {
            CursorMove::Selected(self.row_idx)
        }
    }

    /// Step the cursor back.
    pub fn prev_content(&mut self) -> CursorMove {
        if self.row_idx == 0 {
            return CursorMove::BeforeStart;
        }
        self.row_idx = (self.row_idx - 1).min(self.count().saturating_sub(1));
        CursorMove::Selected(self.row_idx)
    }

    /// Derive the load state from `count` against `total`.
    ///
    /// A count above the total means items were removed on the server since
    /// they were fetched; the container is flagged [`LoadState::Stale`]
    /// instead of waiting forever for `count == total`.
    fn reconcile_state(&mut self) {
        let count = self.count();
        let total = self.total;
        self.load_state = if count == total {
            LoadState::Complete
        } else if count > total {
            if self.load_state != LoadState::Stale {
                log::warn!(
                    "Container {} has {count} items loaded but the server reports {total}",
                    self.id
                );
            }
            LoadState::Stale
        } else if matches!(self.load_state, LoadState::Complete | LoadState::Stale) {
            LoadState::Partial
        } else {
            self.load_state
        };
        self.row_idx = self.row_idx.min(self.cursor_limit());
    }

    fn cursor_limit(&self) -> usize {
        self.count().max(self.total)
    }
}

impl From<ContainerSummary> for Container {
    fn from(summary: ContainerSummary) -> Self {
        let mut container = Self {
            id: summary.id,
            name: summary.name,
            path: summary.path,
            description: summary.description,
            preview_url: summary.preview_url,
            total: summary.total,
            ..Self::default()
        };
        container.set_contents(summary.contents);
        container
    }
}

/// Position of `item` (matched by id) within `list`.
pub fn position_in(list: &[Content], item: &Content) -> Option<usize> {
    list.iter().position(|c| c.id == item.id)
}

fn dedupe_sorted(items: Vec<Content>) -> Vec<Content> {
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(items.len());
    let mut unique: Vec<Content> = Vec::with_capacity(items.len());
    for item in items {
        if let Some(&pos) = positions.get(&item.id) {
            unique[pos] = item;
        } else {
            positions.insert(item.id.clone(), unique.len());
            unique.push(item);
        }
    }
    unique.sort_by(|a, b| a.idx.cmp(&b.idx).then_with(|| a.id.cmp(&b.id)));
    unique
}
