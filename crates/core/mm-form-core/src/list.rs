//! Ordered add/remove lists backing the agenda, attendee and action-item sections

use crate::naming::ListKind;

/// One row of a dynamic list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry<T> {
    ordinal: usize,
    value: T,
}

impl<T> ListEntry<T> {
    /// Positional identifier embedded in the row's field names
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

/// Rows in display order.
///
/// A new row's ordinal is the row count when nothing has been removed yet;
/// ordinals of removed rows are never handed out again so field names stay
/// unique for the lifetime of the page.
#[derive(Debug, Clone)]
pub struct DynamicList<T> {
    kind: ListKind,
    entries: Vec<ListEntry<T>>,
    next_ordinal: usize,
}

impl<T> DynamicList<T> {
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            next_ordinal: 0,
        }
    }

    /// Seed from server-rendered rows, numbered from zero
    pub fn with_values(kind: ListKind, values: impl IntoIterator<Item = T>) -> Self {
        let mut list = Self::new(kind);
        for value in values {
            list.push(value);
        }
        list
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    /// Append a row and return its ordinal
    pub fn push(&mut self, value: T) -> usize {
        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;
        self.entries.push(ListEntry { ordinal, value });
        ordinal
    }

    /// Remove the row with `ordinal`; `None` when it is already gone
    pub fn remove(&mut self, ordinal: usize) -> Option<T> {
        let index = self.index_of(ordinal)?;
        Some(self.entries.remove(index).value)
    }

    /// Display position of the row with `ordinal`
    pub fn index_of(&self, ordinal: usize) -> Option<usize> {
        self.entries.iter().position(|e| e.ordinal == ordinal)
    }

    /// Move the row with `ordinal` so it ends up at `to_index`, clamped to the
    /// last position. Returns the `(from, to)` positions; ordinals are kept.
    pub fn move_entry(&mut self, ordinal: usize, to_index: usize) -> Option<(usize, usize)> {
        let from = self.index_of(ordinal)?;
        let to = to_index.min(self.entries.len() - 1);
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        Some((from, to))
    }

    pub fn get(&self, ordinal: usize) -> Option<&T> {
        self.entries
            .iter()
            .find(|e| e.ordinal == ordinal)
            .map(|e| &e.value)
    }

    pub fn get_mut(&mut self, ordinal: usize) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|e| e.ordinal == ordinal)
            .map(|e| &mut e.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ListEntry<T>> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ListEntry<T>> {
        self.entries.iter_mut()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|e| &e.value)
    }

    pub fn ordinals(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.ordinal).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Default> DynamicList<T> {
    /// Append an empty row and return its ordinal
    pub fn push_default(&mut self) -> usize {
        self.push(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_match_count_without_removals() {
        let mut list = DynamicList::<String>::with_values(ListKind::Attendees, ["Ana".to_string()]);
        assert_eq!(list.push_default(), 1);
        assert_eq!(list.push_default(), 2);
        assert_eq!(list.ordinals(), vec![0, 1, 2]);
    }

    #[test]
    fn test_removed_ordinals_are_not_reused() {
        let mut list = DynamicList::<String>::new(ListKind::Agenda);
        list.push_default();
        list.push_default();
        list.push_default();
        assert_eq!(list.remove(0), Some(String::new()));
        assert_eq!(list.push_default(), 3);
        assert_eq!(list.ordinals(), vec![1, 2, 3]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut list = DynamicList::<String>::new(ListKind::Agenda);
        list.push("Budget".to_string());
        assert_eq!(list.remove(7), None);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_get_mut_edits_in_place() {
        let mut list = DynamicList::<String>::new(ListKind::Agenda);
        let ordinal = list.push_default();
        *list.get_mut(ordinal).unwrap() = "Roadmap".to_string();
        assert_eq!(list.get(ordinal).map(String::as_str), Some("Roadmap"));
    }

    #[test]
    fn test_move_entry_keeps_ordinals() {
        let mut list = DynamicList::with_values(
            ListKind::Attendees,
            ["Ana", "Bo", "Cy"].map(String::from),
        );
        assert_eq!(list.move_entry(2, 0), Some((2, 0)));
        assert_eq!(list.ordinals(), vec![2, 0, 1]);
        assert_eq!(list.values().collect::<Vec<_>>(), vec!["Cy", "Ana", "Bo"]);

        assert_eq!(list.move_entry(2, 99), Some((0, 2)));
        assert_eq!(list.ordinals(), vec![0, 1, 2]);
        assert_eq!(list.move_entry(7, 0), None);
    }
}
