use tracing::debug;

/// Why an open item was closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearReason {
    Background,
    FilterChanged,
    ViewModeChanged,
    DocumentReplaced,
    Missing,
}

/// The single event or workflow open in the details panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<String>,
}

impl Selection {
    pub fn get(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn open(&mut self, id: &str) -> bool {
        if self.selected.as_deref() == Some(id) {
            return false;
        }
        debug!(%id, "selection opened");
        self.selected = Some(id.to_owned());
        true
    }

    pub fn clear(&mut self, reason: ClearReason) -> bool {
        let Some(previous) = self.selected.take() else {
            return false;
        };
        debug!(id = %previous, ?reason, "selection cleared");
        true
    }
}
