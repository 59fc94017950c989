//! Disclosure-triggered dialogs with a single-open-instance guarantee and
//! focus restoration to the opening element.

use tracing::debug;

use shared::domain::{ModalId, NodeId};

use crate::surface::ModalSurface;

/// A registered dialog. The trigger is a non-owning handle used only for
/// focus restoration; the surface decides whether it still exists.
#[derive(Debug)]
struct ModalEntry {
    id: ModalId,
    root: NodeId,
    trigger: Option<NodeId>,
    open: bool,
}

pub struct ModalStack<S: ModalSurface> {
    surface: S,
    entries: Vec<ModalEntry>,
}

impl<S: ModalSurface> ModalStack<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            entries: Vec::new(),
        }
    }

    /// Registers a dialog once at initialization. `root` is the backdrop
    /// element; `trigger` the link that opens it, when there is one.
    pub fn register(&mut self, id: ModalId, root: NodeId, trigger: Option<NodeId>) {
        if self.entries.iter().any(|entry| entry.id == id) {
            debug!(modal = %id, "modal already registered; ignoring");
            return;
        }
        self.entries.push(ModalEntry {
            id,
            root,
            trigger,
            open: false,
        });
    }

    /// Opens a dialog, closing every other open one first, then moves
    /// keyboard focus into it: the first focusable descendant if any,
    /// otherwise the container itself. A dialog never opens without focus
    /// landing inside it.
    pub fn open(&mut self, id: &ModalId) {
        if !self.entries.iter().any(|entry| entry.id == *id) {
            debug!(modal = %id, "open requested for unregistered modal");
            return;
        }

        let others: Vec<ModalId> = self
            .entries
            .iter()
            .filter(|entry| entry.open && entry.id != *id)
            .map(|entry| entry.id.clone())
            .collect();
        for other in &others {
            self.close(other);
        }

        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == *id) {
            entry.open = true;
        }
        self.surface.set_open(id, true);

        match self.surface.first_focusable(id) {
            Some(node) => self.surface.focus_node(node),
            None => self.surface.focus_container(id),
        }
    }

    /// Closes a dialog and restores focus to its trigger if that element is
    /// still in the document; otherwise restoration is skipped.
    pub fn close(&mut self, id: &ModalId) {
        let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == *id) else {
            return;
        };
        entry.open = false;
        let trigger = entry.trigger;

        self.surface.set_open(id, false);
        if let Some(trigger) = trigger {
            if self.surface.node_in_document(trigger) {
                self.surface.focus_node(trigger);
            }
        }
    }

    /// Click handler for the document: a click whose target is an open
    /// dialog's own root (the backdrop, not a descendant) closes it.
    pub fn handle_backdrop_click(&mut self, target: NodeId) {
        let hit = self
            .entries
            .iter()
            .find(|entry| entry.open && entry.root == target)
            .map(|entry| entry.id.clone());
        if let Some(id) = hit {
            self.close(&id);
        }
    }

    /// Cancel-key handler: closes the currently open dialog, if any.
    pub fn handle_cancel_key(&mut self) {
        if let Some(id) = self.open_modal() {
            self.close(&id);
        }
    }

    /// The currently open dialog. The open set is always of size 0 or 1.
    pub fn open_modal(&self) -> Option<ModalId> {
        self.entries
            .iter()
            .find(|entry| entry.open)
            .map(|entry| entry.id.clone())
    }

    pub fn is_open(&self, id: &ModalId) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.id == *id && entry.open)
    }

    #[cfg(test)]
    fn open_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.open).count()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum SurfaceOp {
        SetOpen(ModalId, bool),
        FocusNode(NodeId),
        FocusContainer(ModalId),
    }

    #[derive(Default)]
    struct MockSurface {
        focusables: HashMap<ModalId, NodeId>,
        in_document: RefCell<HashSet<NodeId>>,
        ops: RefCell<Vec<SurfaceOp>>,
    }

    impl MockSurface {
        fn with_node_in_document(self, node: NodeId) -> Self {
            self.in_document.borrow_mut().insert(node);
            self
        }

        fn with_focusable(mut self, modal: &str, node: NodeId) -> Self {
            self.focusables.insert(ModalId::from(modal), node);
            self
        }

        fn remove_from_document(&self, node: NodeId) {
            self.in_document.borrow_mut().remove(&node);
        }

        fn ops(&self) -> Vec<SurfaceOp> {
            self.ops.borrow().clone()
        }

        fn last_focus(&self) -> Option<SurfaceOp> {
            self.ops
                .borrow()
                .iter()
                .rev()
                .find(|op| !matches!(op, SurfaceOp::SetOpen(..)))
                .cloned()
        }
    }

    impl ModalSurface for MockSurface {
        fn set_open(&self, modal: &ModalId, open: bool) {
            self.ops
                .borrow_mut()
                .push(SurfaceOp::SetOpen(modal.clone(), open));
        }

        fn first_focusable(&self, modal: &ModalId) -> Option<NodeId> {
            self.focusables.get(modal).copied()
        }

        fn focus_node(&self, node: NodeId) {
            self.ops.borrow_mut().push(SurfaceOp::FocusNode(node));
        }

        fn focus_container(&self, modal: &ModalId) {
            self.ops
                .borrow_mut()
                .push(SurfaceOp::FocusContainer(modal.clone()));
        }

        fn node_in_document(&self, node: NodeId) -> bool {
            self.in_document.borrow().contains(&node)
        }
    }

    const ABOUT_ROOT: NodeId = NodeId(1);
    const ABOUT_TRIGGER: NodeId = NodeId(2);
    const ABOUT_CLOSE_BTN: NodeId = NodeId(3);
    const PRIVACY_ROOT: NodeId = NodeId(10);
    const PRIVACY_TRIGGER: NodeId = NodeId(11);

    fn stack_with_two_modals(surface: MockSurface) -> ModalStack<MockSurface> {
        let mut stack = ModalStack::new(surface);
        stack.register(ModalId::from("about"), ABOUT_ROOT, Some(ABOUT_TRIGGER));
        stack.register(ModalId::from("privacy"), PRIVACY_ROOT, Some(PRIVACY_TRIGGER));
        stack
    }

    #[test]
    fn open_moves_focus_to_first_focusable_descendant() {
        let surface = MockSurface::default().with_focusable("about", ABOUT_CLOSE_BTN);
        let mut stack = stack_with_two_modals(surface);

        stack.open(&ModalId::from("about"));

        assert!(stack.is_open(&ModalId::from("about")));
        assert_eq!(
            stack.surface.last_focus(),
            Some(SurfaceOp::FocusNode(ABOUT_CLOSE_BTN))
        );
    }

    #[test]
    fn open_falls_back_to_container_focus() {
        let mut stack = stack_with_two_modals(MockSurface::default());

        stack.open(&ModalId::from("about"));

        assert_eq!(
            stack.surface.last_focus(),
            Some(SurfaceOp::FocusContainer(ModalId::from("about")))
        );
    }

    #[test]
    fn opening_second_modal_closes_first() {
        let mut stack = stack_with_two_modals(MockSurface::default());

        stack.open(&ModalId::from("about"));
        stack.open(&ModalId::from("privacy"));

        assert!(!stack.is_open(&ModalId::from("about")));
        assert!(stack.is_open(&ModalId::from("privacy")));
        assert_eq!(stack.open_count(), 1);
    }

    #[test]
    fn close_restores_focus_to_own_trigger_not_a_previous_one() {
        let surface = MockSurface::default()
            .with_node_in_document(ABOUT_TRIGGER)
            .with_node_in_document(PRIVACY_TRIGGER);
        let mut stack = stack_with_two_modals(surface);

        stack.open(&ModalId::from("about"));
        stack.open(&ModalId::from("privacy"));
        stack.close(&ModalId::from("privacy"));

        assert_eq!(stack.open_count(), 0);
        assert_eq!(
            stack.surface.last_focus(),
            Some(SurfaceOp::FocusNode(PRIVACY_TRIGGER))
        );
    }

    #[test]
    fn close_skips_focus_restore_when_trigger_left_the_document() {
        let surface = MockSurface::default().with_node_in_document(ABOUT_TRIGGER);
        let mut stack = stack_with_two_modals(surface);

        stack.open(&ModalId::from("about"));
        stack.surface.remove_from_document(ABOUT_TRIGGER);
        stack.close(&ModalId::from("about"));

        assert!(!stack.is_open(&ModalId::from("about")));
        let focuses_after_close: Vec<_> = stack
            .surface
            .ops()
            .into_iter()
            .filter(|op| matches!(op, SurfaceOp::FocusNode(node) if *node == ABOUT_TRIGGER))
            .collect();
        assert!(focuses_after_close.is_empty());
    }

    #[test]
    fn backdrop_click_closes_only_when_target_is_the_root() {
        let mut stack = stack_with_two_modals(MockSurface::default());
        stack.open(&ModalId::from("about"));

        // A descendant of the dialog is not the backdrop.
        stack.handle_backdrop_click(ABOUT_CLOSE_BTN);
        assert!(stack.is_open(&ModalId::from("about")));

        stack.handle_backdrop_click(ABOUT_ROOT);
        assert!(!stack.is_open(&ModalId::from("about")));
    }

    #[test]
    fn cancel_key_closes_the_open_modal_and_is_a_noop_otherwise() {
        let mut stack = stack_with_two_modals(MockSurface::default());

        stack.handle_cancel_key();
        assert_eq!(stack.open_count(), 0);

        stack.open(&ModalId::from("privacy"));
        stack.handle_cancel_key();
        assert_eq!(stack.open_count(), 0);
    }

    #[test]
    fn duplicate_registration_is_ignored() {
        let mut stack = stack_with_two_modals(MockSurface::default());
        stack.register(ModalId::from("about"), NodeId(99), None);

        stack.open(&ModalId::from("about"));
        stack.handle_backdrop_click(ABOUT_ROOT);
        assert!(!stack.is_open(&ModalId::from("about")));
    }

    #[test]
    fn dialog_without_trigger_closes_without_focus_restore() {
        let mut stack = ModalStack::new(MockSurface::default());
        stack.register(ModalId::from("security"), NodeId(20), None);

        stack.open(&ModalId::from("security"));
        stack.close(&ModalId::from("security"));

        assert_eq!(
            stack.surface.last_focus(),
            Some(SurfaceOp::FocusContainer(ModalId::from("security")))
        );
    }
}
