//! Expansion requests raised while rendering.
//!
//! Renderers never touch the expansion state directly. Cell `on_expand` and
//! marker callbacks enqueue requests; the host applies them in order after
//! the render pass, one atomic state replacement each.

use std::cell::RefCell;

/// A requested change to the expansion state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandRequest {
    Toggle { id: String, value: bool },
    ExpandAll,
    CollapseAll,
}

/// Ordered queue of pending requests for one render pass.
#[derive(Debug, Default)]
pub struct UpdateQueue {
    pending: RefCell<Vec<ExpandRequest>>,
}

impl UpdateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, request: ExpandRequest) {
        self.pending.borrow_mut().push(request);
    }

    pub fn handle(&self) -> ExpandHandle<'_> {
        ExpandHandle { queue: self }
    }

    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// Take every pending request, leaving the queue empty.
    pub fn drain(&self) -> Vec<ExpandRequest> {
        self.pending.take()
    }
}

/// Callback surface handed to renderers.
#[derive(Debug, Clone, Copy)]
pub struct ExpandHandle<'q> {
    queue: &'q UpdateQueue,
}

impl<'q> ExpandHandle<'q> {
    pub fn toggle(&self, id: &str, value: bool) {
        self.queue.push(ExpandRequest::Toggle {
            id: id.to_string(),
            value,
        });
    }

    pub fn expand_all(&self) {
        self.queue.push(ExpandRequest::ExpandAll);
    }

    pub fn collapse_all(&self) {
        self.queue.push(ExpandRequest::CollapseAll);
    }
}
