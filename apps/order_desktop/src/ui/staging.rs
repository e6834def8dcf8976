//! egui-backed staging surface for the fallback copy path.

use std::collections::BTreeMap;

use crate::clipboard::{ClipboardError, StagedId, StagingSurface};

/// Holds hidden text entries; copying hands the selected one to egui's
/// platform output, which the window integration forwards to the OS.
pub struct EguiStaging {
    ctx: egui::Context,
    next_id: u64,
    hidden: BTreeMap<u64, String>,
    selected: Option<u64>,
}

impl EguiStaging {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            next_id: 0,
            hidden: BTreeMap::new(),
            selected: None,
        }
    }
}

impl StagingSurface for EguiStaging {
    fn attach_hidden(&mut self, text: &str) -> StagedId {
        self.next_id += 1;
        self.hidden.insert(self.next_id, text.to_string());
        StagedId(self.next_id)
    }

    fn select(&mut self, id: StagedId) {
        self.selected = self.hidden.contains_key(&id.0).then_some(id.0);
    }

    fn copy_selection(&mut self) -> Result<(), ClipboardError> {
        let text = self
            .selected
            .and_then(|id| self.hidden.get(&id))
            .cloned()
            .ok_or_else(|| ClipboardError::CopyCommand("no staged text selected".to_string()))?;
        self.ctx.copy_text(text);
        Ok(())
    }

    fn detach(&mut self, id: StagedId) {
        self.hidden.remove(&id.0);
        if self.selected == Some(id.0) {
            self.selected = None;
        }
    }

    #[cfg(test)]
    fn staged_count(&self) -> usize {
        self.hidden.len()
    }
}
