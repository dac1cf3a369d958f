//! Text Selection Seam - Reading the host's selection state
//!
//! The engine never owns text selection; it reads whatever the host reports
//! through [`SelectionSource`] at the moment a release event fires. A
//! snapshot carries the anchor's bounding box (used to locate the target
//! surface) plus one viewport-space client rect per visual line fragment.
//!
//! Hosts are allowed to fail the query: browsers throw when a range index is
//! queried on an empty selection. The capture machine treats every
//! [`SelectionError`] the same as "nothing selected".

use thiserror::Error;

use crate::types::Rect;

/// One frozen view of the host's current text selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSnapshot {
    /// Bounding box of the element containing the selection anchor.
    pub anchor: Rect,
    /// One client rect per selected visual line fragment, in document order.
    pub rects: Vec<Rect>,
}

impl SelectionSnapshot {
    pub fn new(anchor: Rect, rects: Vec<Rect>) -> Self {
        Self { anchor, rects }
    }

    /// A selection with no client rects commits nothing.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

/// Failures a host selection query may report.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The selection has no range at the requested index.
    #[error("selection has no range at index {0}")]
    NoRange(usize),

    /// The anchor node is no longer part of the document.
    #[error("selection anchor is detached from the document")]
    DetachedAnchor,
}

/// Host hook for reading the current text selection.
pub trait SelectionSource {
    /// The current selection, `Ok(None)` when nothing is selected.
    fn current(&self) -> Result<Option<SelectionSnapshot>, SelectionError>;
}

/// Selection source for hosts without text selection (pen-only embeddings).
pub struct NoSelection;

impl SelectionSource for NoSelection {
    fn current(&self) -> Result<Option<SelectionSnapshot>, SelectionError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_emptiness() {
        let anchor = Rect::new(10.0, 100.0, 50.0, 20.0);

        assert!(SelectionSnapshot::new(anchor, vec![]).is_empty());
        assert!(!SelectionSnapshot::new(anchor, vec![anchor]).is_empty());
    }

    #[test]
    fn test_no_selection_source() {
        assert!(matches!(NoSelection.current(), Ok(None)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SelectionError::NoRange(0).to_string(),
            "selection has no range at index 0"
        );
        assert_eq!(
            SelectionError::DetachedAnchor.to_string(),
            "selection anchor is detached from the document"
        );
    }
}
