//! Open/close/payload state for dialog-driven flows.

use std::collections::HashMap;
use std::hash::Hash;

/// State of one dialog, generic over its payload.
///
/// `open` replaces the payload (opening with `None` clears it); `close`
/// deliberately leaves the payload alone so a closing dialog can still
/// render its last contents during the fade-out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModalState<T> {
    pub is_open: bool,
    pub data: Option<T>,
}

impl<T> ModalState<T> {
    /// Closed, with no payload.
    pub fn new() -> Self {
        Self {
            is_open: false,
            data: None,
        }
    }

    /// Closed, seeded with an initial payload.
    pub fn with_data(initial: Option<T>) -> Self {
        Self {
            is_open: false,
            data: initial,
        }
    }

    pub fn open(&mut self, data: Option<T>) {
        self.is_open = true;
        self.data = data;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn set_data(&mut self, data: Option<T>) {
        self.data = data;
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }
}

/// A fixed set of independently managed modals keyed by a caller-supplied
/// enum. Keys are decided at construction; operations on an unknown key are
/// ignored rather than inventing a new dialog.
#[derive(Clone, Debug, Default)]
pub struct ModalGroup<K, T> {
    modals: HashMap<K, ModalState<T>>,
}

impl<K: Eq + Hash, T> ModalGroup<K, T> {
    pub fn new(entries: impl IntoIterator<Item = (K, Option<T>)>) -> Self {
        Self {
            modals: entries
                .into_iter()
                .map(|(key, initial)| (key, ModalState::with_data(initial)))
                .collect(),
        }
    }

    pub fn get(&self, key: &K) -> Option<&ModalState<T>> {
        self.modals.get(key)
    }

    pub fn is_open(&self, key: &K) -> bool {
        self.modals.get(key).map(|m| m.is_open).unwrap_or(false)
    }

    pub fn data(&self, key: &K) -> Option<&T> {
        self.modals.get(key).and_then(ModalState::data)
    }

    pub fn open(&mut self, key: &K, data: Option<T>) {
        if let Some(modal) = self.modals.get_mut(key) {
            modal.open(data);
        }
    }

    pub fn close(&mut self, key: &K) {
        if let Some(modal) = self.modals.get_mut(key) {
            modal.close();
        }
    }

    pub fn set_data(&mut self, key: &K, data: Option<T>) {
        if let Some(modal) = self.modals.get_mut(key) {
            modal.set_data(data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum OrderDialog {
        Detail,
        CancelConfirm,
    }

    #[test]
    fn open_replaces_data_and_none_clears_it() {
        let mut modal = ModalState::new();
        modal.open(Some("005930"));
        assert!(modal.is_open);
        assert_eq!(modal.data(), Some(&"005930"));

        // Re-opening without a payload clears the previous one.
        modal.open(None);
        assert!(modal.is_open);
        assert_eq!(modal.data(), None);
    }

    #[test]
    fn close_preserves_data() {
        let mut modal = ModalState::new();
        modal.open(Some(42));
        modal.close();
        assert!(!modal.is_open);
        assert_eq!(modal.data(), Some(&42));
    }

    #[test]
    fn set_data_works_while_closed() {
        let mut modal = ModalState::with_data(Some(1));
        assert!(!modal.is_open);
        modal.set_data(Some(2));
        assert_eq!(modal.data(), Some(&2));
        modal.set_data(None);
        assert_eq!(modal.data(), None);
    }

    #[test]
    fn group_members_are_independent() {
        let mut group = ModalGroup::new([
            (OrderDialog::Detail, None::<u32>),
            (OrderDialog::CancelConfirm, Some(7)),
        ]);

        group.open(&OrderDialog::Detail, Some(99));
        assert!(group.is_open(&OrderDialog::Detail));
        assert!(!group.is_open(&OrderDialog::CancelConfirm));
        assert_eq!(group.data(&OrderDialog::CancelConfirm), Some(&7));

        group.close(&OrderDialog::Detail);
        assert_eq!(group.data(&OrderDialog::Detail), Some(&99));
    }
}
