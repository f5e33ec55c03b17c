//! Headless state machine for the history gallery view.
//!
//! Models the client-side gallery without any UI or timer dependency: every
//! external stimulus (typing, filter changes, fetch outcomes, the debounce
//! timer firing) is an explicit input, and every side effect the host must
//! perform comes back as an [`Effect`]. Debounced search and immediate
//! filter changes are two independent triggers feeding the single
//! "fetch parameters changed" event, which keeps their ordering
//! deterministic and testable.
//!
//! The host owns the actual timer: [`Effect::ScheduleDebounce`] asks it to
//! (re)arm one, and it reports expiry back via
//! [`GalleryState::debounce_elapsed`].

use std::time::Duration;

use crate::overlay::OverlayCursor;
use crate::types::{EntryId, SortOrder};

/// Delay between the last keystroke and the search term taking effect.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Entries shown per gallery page.
pub const PAGE_SIZE: u32 = 12;

/// Sentinel model-filter value meaning "no filter". Reserved: it must never
/// collide with a real model identifier.
pub const MODEL_FILTER_ALL: &str = "all";

/// The minimum an entry must expose for the gallery to manage it.
pub trait GalleryEntry {
    fn id(&self) -> EntryId;
    fn set_favorite(&mut self, favorite: bool);
}

/// Model filter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModelFilter {
    /// No filtering (the `"all"` sentinel).
    #[default]
    All,
    /// Exact match on one model identifier.
    Model(String),
}

impl ModelFilter {
    /// Interpret a raw filter value: the sentinel or an empty string mean
    /// no filter.
    pub fn from_param(value: &str) -> Self {
        if value.is_empty() || value == MODEL_FILTER_ALL {
            ModelFilter::All
        } else {
            ModelFilter::Model(value.to_string())
        }
    }

    fn as_option(&self) -> Option<String> {
        match self {
            ModelFilter::All => None,
            ModelFilter::Model(id) => Some(id.clone()),
        }
    }
}

/// What the gallery is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Entries (possibly none) are displayed.
    Loaded,
    /// A fetch is in flight.
    Loading,
    /// The last fetch failed; the list is empty.
    Error,
}

/// Parameters for one history fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchParams {
    pub page: u32,
    pub page_size: u32,
    pub search_term: Option<String>,
    pub model_filter: Option<String>,
    pub sort_order: SortOrder,
}

/// A side effect the host must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// (Re)arm the search debounce timer for the given delay.
    ScheduleDebounce(Duration),
    /// Issue a history fetch with these parameters.
    Fetch(FetchParams),
    /// Show a transient, dismissable failure notification.
    Notify(&'static str),
}

/// One page of fetched results, as reported back by the host.
#[derive(Debug, Clone)]
pub struct FetchedPage<E> {
    pub entries: Vec<E>,
    pub total_pages: u32,
    pub total_items: u64,
}

/// The gallery view model.
#[derive(Debug)]
pub struct GalleryState<E: GalleryEntry> {
    search_input: String,
    search_term: String,
    model_filter: ModelFilter,
    sort_order: SortOrder,
    page: u32,
    phase: Phase,
    entries: Vec<E>,
    total_pages: u32,
    total_items: u64,
    overlay: Option<OverlayCursor>,
}

impl<E: GalleryEntry> Default for GalleryState<E> {
    fn default() -> Self {
        Self {
            search_input: String::new(),
            search_term: String::new(),
            model_filter: ModelFilter::All,
            sort_order: SortOrder::Desc,
            page: 1,
            phase: Phase::Loaded,
            entries: Vec::new(),
            total_pages: 1,
            total_items: 0,
            overlay: None,
        }
    }
}

impl<E: GalleryEntry> GalleryState<E> {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Accessors ─────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    pub fn overlay(&self) -> Option<&OverlayCursor> {
        self.overlay.as_ref()
    }

    /// The entry currently shown in the overlay, if it is open.
    pub fn overlay_entry(&self) -> Option<&E> {
        self.overlay.as_ref().and_then(|c| self.entries.get(c.index()))
    }

    /// Parameters a fetch issued right now would use.
    pub fn fetch_params(&self) -> FetchParams {
        FetchParams {
            page: self.page,
            page_size: PAGE_SIZE,
            search_term: if self.search_term.is_empty() {
                None
            } else {
                Some(self.search_term.clone())
            },
            model_filter: self.model_filter.as_option(),
            sort_order: self.sort_order,
        }
    }

    // ── Inputs: lifecycle ─────────────────────────────────────────────

    /// The view mounted; load the first page.
    pub fn mounted(&mut self) -> Effect {
        Effect::Fetch(self.fetch_params())
    }

    // ── Inputs: search (debounced trigger) ────────────────────────────

    /// The raw search input changed. Never fetches directly; the term only
    /// applies once the debounce elapses.
    pub fn search_input_changed(&mut self, text: impl Into<String>) -> Effect {
        self.search_input = text.into();
        Effect::ScheduleDebounce(SEARCH_DEBOUNCE)
    }

    /// The debounce timer fired. Applies the pending input; a changed term
    /// resets to page 1 (the reset is synchronous, only the term itself was
    /// debounced) and triggers a fetch.
    pub fn debounce_elapsed(&mut self) -> Option<Effect> {
        if self.search_input == self.search_term {
            return None;
        }
        self.search_term = self.search_input.clone();
        self.page = 1;
        Some(Effect::Fetch(self.fetch_params()))
    }

    // ── Inputs: immediate filter triggers ─────────────────────────────

    /// The model filter changed: reset to page 1 and refetch immediately.
    pub fn model_filter_changed(&mut self, filter: ModelFilter) -> Effect {
        self.model_filter = filter;
        self.page = 1;
        Effect::Fetch(self.fetch_params())
    }

    /// The sort order changed: reset to page 1 and refetch immediately.
    pub fn sort_order_changed(&mut self, order: SortOrder) -> Effect {
        self.sort_order = order;
        self.page = 1;
        Effect::Fetch(self.fetch_params())
    }

    /// The user navigated to another page. Filters are untouched.
    pub fn page_changed(&mut self, page: u32) -> Effect {
        self.page = page.max(1);
        Effect::Fetch(self.fetch_params())
    }

    // ── Inputs: fetch outcomes ────────────────────────────────────────

    pub fn fetch_started(&mut self) {
        self.phase = Phase::Loading;
    }

    /// A fetch resolved. Replaces the visible page. If the overlay is open
    /// past the end of the new page it closes; otherwise it stays anchored
    /// to its index.
    ///
    /// There is no in-flight request tracking: a stale response that
    /// resolves after a newer one will overwrite it, matching the observed
    /// client behaviour.
    pub fn fetch_succeeded(&mut self, fetched: FetchedPage<E>) {
        self.entries = fetched.entries;
        self.total_pages = fetched.total_pages.max(1);
        self.total_items = fetched.total_items;
        self.phase = Phase::Loaded;
        if let Some(cursor) = &self.overlay {
            if cursor.index() >= self.entries.len() {
                self.overlay = None;
            }
        }
    }

    /// A fetch failed: clear the list rather than showing stale rows next
    /// to an error, and tell the host to notify. No automatic retry.
    pub fn fetch_failed(&mut self) -> Effect {
        self.entries.clear();
        self.overlay = None;
        self.phase = Phase::Error;
        Effect::Notify("Failed to load history")
    }

    // ── Inputs: overlay navigation ────────────────────────────────────

    /// Open the overlay on the entry at `index` within the visible page.
    /// Out-of-range indices are ignored.
    pub fn open_overlay(&mut self, index: usize) {
        if index < self.entries.len() {
            self.overlay = Some(OverlayCursor::new(index, self.entries.len()));
        }
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    /// Step the overlay to the previous entry. No-op at the first entry.
    pub fn overlay_prev(&mut self) {
        if let Some(cursor) = &mut self.overlay {
            cursor.prev();
        }
    }

    /// Step the overlay to the next entry. No-op at the last entry.
    pub fn overlay_next(&mut self) {
        if let Some(cursor) = &mut self.overlay {
            cursor.next();
        }
    }

    // ── Inputs: mutation results ──────────────────────────────────────

    /// A favorite toggle resolved for `id` with the new value. Updates the
    /// matching visible entry, so the grid and an open overlay can never
    /// disagree.
    pub fn favorite_applied(&mut self, id: EntryId, favorite: bool) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id() == id) {
            entry.set_favorite(favorite);
        }
    }

    /// A delete resolved for `id`. Removes the entry from the visible page;
    /// an overlay showing it closes, one past it re-anchors.
    pub fn entry_deleted(&mut self, id: EntryId) {
        let Some(removed) = self.entries.iter().position(|e| e.id() == id) else {
            return;
        };
        self.entries.remove(removed);
        if self.total_items > 0 {
            self.total_items -= 1;
        }
        self.overlay = match self.overlay.take() {
            Some(cursor) => cursor.entry_removed(removed, self.entries.len()),
            None => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use uuid::Uuid;

    #[derive(Debug, Clone)]
    struct TestEntry {
        id: EntryId,
        favorite: bool,
    }

    impl TestEntry {
        fn new() -> Self {
            Self {
                id: Uuid::new_v4(),
                favorite: false,
            }
        }
    }

    impl GalleryEntry for TestEntry {
        fn id(&self) -> EntryId {
            self.id
        }
        fn set_favorite(&mut self, favorite: bool) {
            self.favorite = favorite;
        }
    }

    fn loaded_gallery(n: usize) -> (GalleryState<TestEntry>, Vec<TestEntry>) {
        let mut gallery = GalleryState::new();
        let entries: Vec<TestEntry> = (0..n).map(|_| TestEntry::new()).collect();
        gallery.fetch_succeeded(FetchedPage {
            entries: entries.clone(),
            total_pages: 1,
            total_items: n as u64,
        });
        (gallery, entries)
    }

    #[test]
    fn typing_schedules_debounce_without_fetching() {
        let mut gallery: GalleryState<TestEntry> = GalleryState::new();
        let effect = gallery.search_input_changed("ca");
        assert_eq!(effect, Effect::ScheduleDebounce(SEARCH_DEBOUNCE));
        let effect = gallery.search_input_changed("cat");
        assert_eq!(effect, Effect::ScheduleDebounce(SEARCH_DEBOUNCE));
        // The applied term is still empty until the debounce elapses.
        assert_eq!(gallery.fetch_params().search_term, None);
    }

    #[test]
    fn debounce_applies_term_and_resets_page() {
        let mut gallery: GalleryState<TestEntry> = GalleryState::new();
        gallery.page_changed(3);
        gallery.search_input_changed("cat");

        let effect = gallery.debounce_elapsed().expect("term changed");
        match effect {
            Effect::Fetch(params) => {
                assert_eq!(params.search_term.as_deref(), Some("cat"));
                assert_eq!(params.page, 1, "filter change must reset to page 1");
            }
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    #[test]
    fn debounce_with_unchanged_term_is_silent() {
        let mut gallery: GalleryState<TestEntry> = GalleryState::new();
        gallery.search_input_changed("cat");
        gallery.debounce_elapsed().unwrap();
        // Re-typing the same term then debouncing again changes nothing.
        gallery.search_input_changed("cat");
        assert_eq!(gallery.debounce_elapsed(), None);
    }

    #[test]
    fn model_filter_change_fetches_immediately_and_resets_page() {
        let mut gallery: GalleryState<TestEntry> = GalleryState::new();
        gallery.page_changed(5);

        let effect =
            gallery.model_filter_changed(ModelFilter::Model("fal-ai/flux-lora".to_string()));
        match effect {
            Effect::Fetch(params) => {
                assert_eq!(params.page, 1);
                assert_eq!(params.model_filter.as_deref(), Some("fal-ai/flux-lora"));
            }
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    #[test]
    fn page_change_keeps_filters() {
        let mut gallery: GalleryState<TestEntry> = GalleryState::new();
        gallery.model_filter_changed(ModelFilter::Model("m1".to_string()));

        let effect = gallery.page_changed(2);
        match effect {
            Effect::Fetch(params) => {
                assert_eq!(params.page, 2);
                assert_eq!(params.model_filter.as_deref(), Some("m1"));
            }
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    #[test]
    fn sentinel_model_filter_means_no_filter() {
        assert_eq!(ModelFilter::from_param("all"), ModelFilter::All);
        assert_eq!(ModelFilter::from_param(""), ModelFilter::All);
        assert_eq!(
            ModelFilter::from_param("fal-ai/flux-pro"),
            ModelFilter::Model("fal-ai/flux-pro".to_string())
        );
    }

    #[test]
    fn fetch_failure_clears_list_and_notifies() {
        let (mut gallery, _) = loaded_gallery(4);
        gallery.fetch_started();
        assert_eq!(gallery.phase(), Phase::Loading);

        let effect = gallery.fetch_failed();
        assert_matches!(effect, Effect::Notify(_));
        assert_eq!(gallery.phase(), Phase::Error);
        assert!(gallery.entries().is_empty());
    }

    #[test]
    fn overlay_navigation_clamped_at_both_ends() {
        let (mut gallery, _) = loaded_gallery(3);
        gallery.open_overlay(0);
        assert!(!gallery.overlay().unwrap().can_prev());

        gallery.overlay_prev();
        assert_eq!(gallery.overlay().unwrap().index(), 0);

        gallery.overlay_next();
        gallery.overlay_next();
        let cursor = gallery.overlay().unwrap();
        assert_eq!(cursor.index(), 2);
        assert!(!cursor.can_next());

        gallery.overlay_next();
        assert_eq!(gallery.overlay().unwrap().index(), 2);
    }

    #[test]
    fn favorite_propagates_to_visible_entry_and_overlay() {
        let (mut gallery, entries) = loaded_gallery(2);
        gallery.open_overlay(1);

        gallery.favorite_applied(entries[1].id, true);

        assert!(gallery.entries()[1].favorite);
        assert!(gallery.overlay_entry().unwrap().favorite);
    }

    #[test]
    fn deleting_overlay_entry_closes_overlay() {
        let (mut gallery, entries) = loaded_gallery(2);
        gallery.open_overlay(1);

        gallery.entry_deleted(entries[1].id);

        assert!(gallery.overlay().is_none());
        assert_eq!(gallery.entries().len(), 1);
        assert_eq!(gallery.total_items(), 1);
    }

    #[test]
    fn deleting_before_overlay_reanchors_cursor() {
        let (mut gallery, entries) = loaded_gallery(3);
        gallery.open_overlay(2);
        let shown = gallery.overlay_entry().unwrap().id;

        gallery.entry_deleted(entries[0].id);

        // Still showing the same entry, now at index 1.
        assert_eq!(gallery.overlay().unwrap().index(), 1);
        assert_eq!(gallery.overlay_entry().unwrap().id, shown);
    }

    #[test]
    fn stale_fetch_overwrites_newer_state() {
        // Acknowledged race: whichever response resolves last wins.
        let (mut gallery, _) = loaded_gallery(4);
        let stale = FetchedPage {
            entries: vec![TestEntry::new()],
            total_pages: 1,
            total_items: 1,
        };
        gallery.fetch_succeeded(stale);
        assert_eq!(gallery.entries().len(), 1);
    }
}
