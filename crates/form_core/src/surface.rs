//! Seams to the rendering layer. The core never touches the document
//! directly; it drives these traits and lets the embedding (browser DOM,
//! desktop toolkit, or a test double) perform the actual mutations.

use shared::domain::{EncryptionStrength, FieldId, ModalId, NodeId};

use crate::render::DownloadEntry;

/// Visual validity marker for one field. Applying any state first clears
/// the previous marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldState {
    /// No marker (empty field, or cleared).
    Neutral,
    /// Green check treatment for a non-empty valid value.
    Success,
    /// Error treatment plus the message shown under the field.
    Error(String),
}

/// The form and outcome panels.
pub trait FormSurface: Send + Sync {
    /// Current raw value of a field, read at application time.
    fn field_value(&self, field: FieldId) -> String;

    fn apply_field_state(&self, field: FieldId, state: FieldState);

    /// Enables or disables every form control, including the submit button.
    fn set_controls_enabled(&self, enabled: bool);

    /// Shows the results panel (hiding the error panel) and scrolls it into
    /// view.
    fn show_results(&self, message: &str, downloads: &[DownloadEntry]);

    /// Shows the error panel (hiding the results panel) and scrolls it into
    /// view.
    fn show_error(&self, message: &str);

    /// Hides both outcome panels.
    fn hide_outcome_panels(&self);

    /// Clears all inputs and restores the strength selector default.
    fn reset_inputs(&self, default_strength: EncryptionStrength);

    fn scroll_to_top(&self);
}

/// Dialog containers and focus handling.
pub trait ModalSurface {
    /// Shows or hides a dialog container.
    fn set_open(&self, modal: &ModalId, open: bool);

    /// First focusable descendant in document order: buttons, links with an
    /// href, inputs, selects, textareas, and non-negative tab-index
    /// elements.
    fn first_focusable(&self, modal: &ModalId) -> Option<NodeId>;

    fn focus_node(&self, node: NodeId);

    /// Makes the dialog container itself focusable and focuses it. Fallback
    /// for dialogs with no focusable descendant.
    fn focus_container(&self, modal: &ModalId);

    /// Whether an element is still attached to the document.
    fn node_in_document(&self, node: NodeId) -> bool;
}
