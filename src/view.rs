// Copyright (c) 2025 - Cowboy AI, Inc.
//! Item detail view
//!
//! A minimal consuming context for a record binding. Mounting attaches, and
//! unmounting or dropping detaches. Rendering re-reads the binding every
//! time, so callers may render as often as they like.

use crate::binding::{BindingState, LatestValueBinding};
use crate::record::Record;
use crate::service::ItemService;

/// Render the detail text for a binding state
///
/// `Empty` renders nothing.
pub fn render(state: &BindingState<Record>) -> Option<String> {
    state
        .value()
        .map(|record| format!("{} (id {})", record.name(), record.id()))
}

/// Detail view showing the latest record from an [`ItemService`]
#[derive(Debug)]
pub struct ItemDetail {
    binding: LatestValueBinding<Record>,
}

impl ItemDetail {
    /// Create the view and attach it to the service's record sequence
    pub fn mount(service: &ItemService) -> Self {
        Self {
            binding: LatestValueBinding::attach(service.items()),
        }
    }

    /// Current detail text, or `None` while no record is held
    pub fn render(&self) -> Option<String> {
        render(&self.binding.state())
    }

    /// Wait until the view should re-render
    ///
    /// Returns `false` once the view can no longer change.
    pub async fn changed(&mut self) -> bool {
        self.binding.changed().await
    }

    /// The binding backing this view
    pub fn binding(&self) -> &LatestValueBinding<Record> {
        &self.binding
    }

    /// Tear the view down, detaching its binding
    pub fn unmount(self) {
        self.binding.detach();
    }
}
