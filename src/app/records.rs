//! In-memory snapshot list and its filtered projection.
//!
//! [`RecordStore`] owns the ordered snapshot list loaded from `zfs` together with
//! the per-record selection flags. [`Filter`] derives the visible-index projection
//! from a case-insensitive substring query over snapshot identities. Neither type
//! performs I/O.
//!
//! The store keeps the filter in sync itself: every mutation that changes the
//! record list re-runs the current query, so callers never observe a stale
//! projection.

use crate::domain::Snapshot;

/// Case-insensitive substring filter over snapshot identities.
///
/// `matched` is empty when `query` is empty, which means "no filter, show all".
/// Otherwise it holds exactly the indices whose identity contains the query,
/// in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub query: String,
    pub matched: Vec<usize>,
}

impl Filter {
    /// Recomputes `matched` for `query` against `records`.
    ///
    /// Idempotent: running it twice with the same inputs yields the same projection.
    ///
    /// # Examples
    ///
    /// ```
    /// use zfsguard::app::records::Filter;
    /// use zfsguard::domain::Snapshot;
    ///
    /// let records: Vec<Snapshot> = ["tank@a", "tank@b", "pool2@c"]
    ///     .iter()
    ///     .map(|n| Snapshot::new(n, "0B", "0B", None))
    ///     .collect();
    ///
    /// let mut filter = Filter::default();
    /// filter.apply("@A", &records);
    /// assert_eq!(filter.matched, vec![0]);
    ///
    /// filter.apply("a", &records);
    /// assert_eq!(filter.matched, vec![0, 1]);
    ///
    /// filter.apply("", &records);
    /// assert!(filter.matched.is_empty());
    /// ```
    pub fn apply(&mut self, query: &str, records: &[Snapshot]) {
        self.query = query.to_string();
        self.matched.clear();

        if query.is_empty() {
            return;
        }

        let needle = query.to_lowercase();
        self.matched.extend(
            records
                .iter()
                .enumerate()
                .filter(|(_, record)| record.name.to_lowercase().contains(&needle))
                .map(|(index, _)| index),
        );
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }
}

/// Ordered snapshot list with selection flags and the active filter.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Snapshot>,
    filter: Filter,
}

impl RecordStore {
    #[must_use]
    pub fn new(records: Vec<Snapshot>) -> Self {
        let mut store = Self {
            records,
            filter: Filter::default(),
        };
        store.refilter();
        store
    }

    /// Replaces every record, preserving order and duplicates, and re-runs the filter.
    ///
    /// Selection flags of the incoming records are taken as-is.
    pub fn replace_all(&mut self, records: Vec<Snapshot>) {
        self.records = records;
        self.refilter();
    }

    /// Flips the selection flag of the record at store index `index`.
    ///
    /// Out-of-range indices are ignored.
    pub fn toggle_selection(&mut self, index: usize) {
        if let Some(record) = self.records.get_mut(index) {
            record.selected = !record.selected;
        }
    }

    /// Marks the record at store index `index` as selected.
    pub fn select(&mut self, index: usize) {
        if let Some(record) = self.records.get_mut(index) {
            record.selected = true;
        }
    }

    /// Selected records in store order.
    #[must_use]
    pub fn selected_records(&self) -> Vec<&Snapshot> {
        self.records.iter().filter(|r| r.selected).collect()
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.records.iter().filter(|r| r.selected).count()
    }

    /// Selects every visible record unless all of them already are, in which case
    /// every visible record is deselected. Filtered-out records are never touched.
    ///
    /// # Examples
    ///
    /// ```
    /// use zfsguard::app::records::RecordStore;
    /// use zfsguard::domain::Snapshot;
    ///
    /// let mut store = RecordStore::new(vec![
    ///     Snapshot::new("tank@a", "0B", "0B", None),
    ///     Snapshot::new("tank@b", "0B", "0B", None),
    /// ]);
    /// store.toggle_selection(0);
    ///
    /// let visible = store.visible_indices();
    /// store.toggle_select_all(&visible);
    /// assert_eq!(store.selected_count(), 2);
    /// store.toggle_select_all(&visible);
    /// assert_eq!(store.selected_count(), 0);
    /// ```
    pub fn toggle_select_all(&mut self, visible: &[usize]) {
        let all_selected = visible
            .iter()
            .all(|&i| self.records.get(i).is_some_and(|r| r.selected));

        for &index in visible {
            if let Some(record) = self.records.get_mut(index) {
                record.selected = !all_selected;
            }
        }
    }

    /// Sets the query and recomputes the projection.
    pub fn apply_filter(&mut self, query: &str) {
        let _span = tracing::debug_span!(
            "apply_filter",
            total_records = self.records.len(),
            query_len = query.len()
        )
        .entered();

        self.filter.apply(query, &self.records);

        tracing::debug!(matched = self.filter.matched.len(), "filter applied");
    }

    fn refilter(&mut self) {
        let query = std::mem::take(&mut self.filter.query);
        self.filter.apply(&query, &self.records);
    }

    /// Store indices currently shown: the filter's matches, or every index when
    /// no query is active.
    #[must_use]
    pub fn visible_indices(&self) -> Vec<usize> {
        if self.filter.is_active() {
            self.filter.matched.clone()
        } else {
            (0..self.records.len()).collect()
        }
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        if self.filter.is_active() {
            self.filter.matched.len()
        } else {
            self.records.len()
        }
    }

    /// Store index of the `position`-th visible record.
    #[must_use]
    pub fn visible_index(&self, position: usize) -> Option<usize> {
        if self.filter.is_active() {
            self.filter.matched.get(position).copied()
        } else if position < self.records.len() {
            Some(position)
        } else {
            None
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.records.get(index)
    }

    #[must_use]
    pub fn records(&self) -> &[Snapshot] {
        &self.records
    }

    #[must_use]
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(names: &[&str]) -> RecordStore {
        RecordStore::new(
            names
                .iter()
                .map(|n| Snapshot::new(n, "1K", "2K", None))
                .collect(),
        )
    }

    fn visible_names(store: &RecordStore) -> Vec<String> {
        store
            .visible_indices()
            .into_iter()
            .filter_map(|i| store.get(i).map(|r| r.name.clone()))
            .collect()
    }

    #[test]
    fn query_narrows_and_clearing_restores_order() {
        let mut s = store(&["tank@a", "tank@b", "pool2@c"]);

        s.apply_filter("@A");
        assert_eq!(visible_names(&s), vec!["tank@a"]);

        s.apply_filter("a");
        assert_eq!(visible_names(&s), vec!["tank@a", "tank@b"]);

        s.apply_filter("");
        assert_eq!(visible_names(&s), vec!["tank@a", "tank@b", "pool2@c"]);
    }

    #[test]
    fn query_without_matches_shows_nothing() {
        let mut s = store(&["tank@a", "tank@b"]);
        s.apply_filter("zzz");
        assert_eq!(s.visible_count(), 0);
        assert!(s.visible_index(0).is_none());
    }

    #[test]
    fn replace_all_reruns_the_active_query() {
        let mut s = store(&["tank@a"]);
        s.apply_filter("pool");
        assert_eq!(s.visible_count(), 0);

        s.replace_all(vec![
            Snapshot::new("pool@x", "0B", "0B", None),
            Snapshot::new("tank@y", "0B", "0B", None),
            Snapshot::new("pool@x", "0B", "0B", None),
        ]);
        assert_eq!(s.filter().query, "pool");
        assert_eq!(s.filter().matched, vec![0, 2]);
    }

    #[test]
    fn select_all_ignores_filtered_out_records() {
        let mut s = store(&["tank@a", "tank@b", "pool2@c"]);
        s.apply_filter("tank");

        let visible = s.visible_indices();
        s.toggle_select_all(&visible);

        let selected: Vec<_> = s.selected_records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(selected, vec!["tank@a", "tank@b"]);
        assert!(!s.get(2).unwrap().selected);
    }

    #[test]
    fn select_all_on_mixed_selection_unifies_then_clears() {
        let mut s = store(&["a@1", "a@2", "a@3"]);
        s.toggle_selection(1);
        let visible = s.visible_indices();

        s.toggle_select_all(&visible);
        assert_eq!(s.selected_count(), 3);

        s.toggle_select_all(&visible);
        assert_eq!(s.selected_count(), 0);
    }

    #[test]
    fn toggle_out_of_range_is_ignored() {
        let mut s = store(&["a@1"]);
        s.toggle_selection(5);
        assert_eq!(s.selected_count(), 0);
    }
}
