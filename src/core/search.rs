use std::time::{Duration, Instant};

use crate::core::pagination::Pagination;
use crate::models::{InstructorProfile, SearchFilters, ViewMode};

/// Default quiet period before a staged search input commits
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Default directory page size (3x3 grid)
pub const DEFAULT_PAGE_SIZE: u32 = 9;

/// Viewport width in pixels below which the directory always renders as a grid
pub const NARROW_VIEWPORT_PX: u32 = 768;

/// Lifecycle of a search interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Searching,
    Success,
    Error,
}

/// A committed search input awaiting downstream resolution
///
/// The sequence number ties an eventual response back to the input that
/// produced it; a response carrying any other sequence is stale.
#[derive(Debug, Clone)]
pub struct SearchDispatch {
    pub seq: u64,
    pub filters: SearchFilters,
}

#[derive(Debug, Clone)]
struct PendingInput {
    filters: SearchFilters,
    due: Instant,
}

/// Search/pagination coordinator for the instructor directory
///
/// An explicitly owned state object: the embedding layer feeds it input
/// events and clock readings, performs the dispatched fetches, and applies
/// the outcomes back. The controller itself does no I/O, so every transition
/// is testable without a runtime or rendering environment.
///
/// # Transitions
/// 1. `set_filters` stages an input; a newer input replaces it (debounce)
/// 2. `poll_commit` commits a quiet input: one dispatch, page reset to 1
/// 3. `apply_results` / `apply_error` resolve the latest dispatch only
/// 4. `go_to_page` navigates within the retained result set
#[derive(Debug, Clone)]
pub struct SearchController {
    phase: SearchPhase,
    filters: SearchFilters,
    pending: Option<PendingInput>,
    debounce: Duration,
    seq: u64,
    results: Vec<InstructorProfile>,
    pagination: Pagination,
    view_mode: ViewMode,
    last_error: Option<String>,
}

impl SearchController {
    pub fn new(page_size: u32, debounce: Duration) -> Self {
        Self {
            phase: SearchPhase::Idle,
            filters: SearchFilters::default(),
            pending: None,
            debounce,
            seq: 0,
            results: Vec::new(),
            pagination: Pagination::new(page_size),
            view_mode: ViewMode::Grid,
            last_error: None,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_DEBOUNCE)
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// The filters of the most recently committed search
    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// The full retained result set (survives a failed refresh)
    pub fn results(&self) -> &[InstructorProfile] {
        &self.results
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Stage a changed search input
    ///
    /// The input does not commit until its quiet period elapses; a newer
    /// input replaces the staged one and restarts the clock, so only the
    /// most recent value can commit.
    pub fn set_filters(&mut self, filters: SearchFilters, now: Instant) {
        self.pending = Some(PendingInput {
            filters,
            due: now + self.debounce,
        });
    }

    /// Deadline of the staged input, if any, for a driving event loop
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.due)
    }

    /// Commit the staged input once its quiet period has elapsed
    ///
    /// At most one dispatch is produced per staged input. Committing moves
    /// the controller into `Searching`, resets the page to 1 and clears the
    /// previous error indicator. Returns `None` while no input is due.
    pub fn poll_commit(&mut self, now: Instant) -> Option<SearchDispatch> {
        if now < self.pending.as_ref()?.due {
            return None;
        }
        let pending = self.pending.take()?;

        self.filters = pending.filters;
        self.seq += 1;
        self.phase = SearchPhase::Searching;
        self.last_error = None;
        self.pagination.go_to(1);

        Some(SearchDispatch {
            seq: self.seq,
            filters: self.filters.clone(),
        })
    }

    /// Apply a resolved candidate set for the given dispatch
    ///
    /// Only the latest committed sequence may update visible state; anything
    /// older is a stale in-flight response and is ignored (the return value
    /// reports whether the results were applied).
    pub fn apply_results(&mut self, seq: u64, results: Vec<InstructorProfile>) -> bool {
        if seq != self.seq {
            tracing::trace!("Discarding stale results for seq {} (current {})", seq, self.seq);
            return false;
        }
        self.pagination.reset(results.len());
        self.results = results;
        self.phase = SearchPhase::Success;
        self.last_error = None;
        true
    }

    /// Record a failed resolution for the given dispatch
    ///
    /// The prior successful result set is retained for display; only the
    /// phase and the error indicator change. Stale errors are ignored.
    pub fn apply_error(&mut self, seq: u64, message: impl Into<String>) -> bool {
        if seq != self.seq {
            tracing::trace!("Discarding stale error for seq {} (current {})", seq, self.seq);
            return false;
        }
        self.phase = SearchPhase::Error;
        self.last_error = Some(message.into());
        true
    }

    /// Navigate within the current result set
    ///
    /// Out-of-range targets clamp into `[1, max(total_pages, 1)]`; asking for
    /// the page already shown is a no-op. Returns whether the page changed.
    pub fn go_to_page(&mut self, page: u32) -> bool {
        self.pagination.go_to(page)
    }

    /// Store the user's layout preference
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// The stored layout preference, regardless of viewport
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Layout actually rendered at the given viewport width
    pub fn effective_view_mode(&self, viewport_width: u32) -> ViewMode {
        effective_view_mode(self.view_mode, viewport_width)
    }

    /// The visible slice of the current result set
    pub fn visible_page(&self) -> &[InstructorProfile] {
        &self.results[self.pagination.page_range()]
    }
}

impl Default for SearchController {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Derive the rendered layout from the stored preference and viewport width
///
/// Narrow viewports force the grid as a derived read: the stored preference
/// is never rewritten, so widening the viewport restores it.
#[inline]
pub fn effective_view_mode(stored: ViewMode, viewport_width: u32) -> ViewMode {
    if viewport_width < NARROW_VIEWPORT_PX {
        ViewMode::Grid
    } else {
        stored
    }
}
