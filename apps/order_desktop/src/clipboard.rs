//! Copy-sample-JSON action: detect a copy strategy, run it, confirm on the button.
//!
//! The preferred strategy is the OS clipboard through `arboard`. When that is
//! disabled or cannot be opened, the exporter falls back to staging the text
//! on a hidden entry of a [`StagingSurface`] and issuing the surface's own
//! copy command. A staged entry is owned by a [`StagedText`] guard, so it is
//! always detached again, whether the copy succeeds, fails or panics.

use std::time::{Duration, Instant};

use arboard::Clipboard;
use thiserror::Error;

pub const EXPORT_LABEL: &str = "📋 Copy sample JSON";
pub const COPIED_LABEL: &str = "✅ Copied!";
pub const CONFIRMATION_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("system clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
    #[error("copy command failed: {0}")]
    CopyCommand(String),
    #[error("sample payload could not be serialized: {0}")]
    Payload(String),
}

pub trait CopyStrategy {
    fn name(&self) -> &'static str;
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Hidden entries left behind on a staging surface.
    #[cfg(test)]
    fn staged_entries(&self) -> usize {
        0
    }
}

pub struct SystemClipboard {
    inner: Clipboard,
}

impl SystemClipboard {
    pub fn open() -> Result<Self, ClipboardError> {
        Clipboard::new()
            .map(|inner| Self { inner })
            .map_err(|err| ClipboardError::Unavailable(err.to_string()))
    }
}

impl CopyStrategy for SystemClipboard {
    fn name(&self) -> &'static str {
        "system"
    }

    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_text(text.to_owned())
            .map_err(|err| ClipboardError::Write(err.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StagedId(pub u64);

/// A UI surface that can hold hidden, selectable text and copy the selection.
pub trait StagingSurface {
    fn attach_hidden(&mut self, text: &str) -> StagedId;
    fn select(&mut self, id: StagedId);
    fn copy_selection(&mut self) -> Result<(), ClipboardError>;
    fn detach(&mut self, id: StagedId);

    #[cfg(test)]
    fn staged_count(&self) -> usize;
}

/// Hidden staged entry; detached from its surface on drop.
pub struct StagedText<'a, S: StagingSurface + ?Sized> {
    surface: &'a mut S,
    id: StagedId,
}

impl<'a, S: StagingSurface + ?Sized> StagedText<'a, S> {
    pub fn attach(surface: &'a mut S, text: &str) -> Self {
        let id = surface.attach_hidden(text);
        Self { surface, id }
    }

    pub fn select_and_copy(&mut self) -> Result<(), ClipboardError> {
        self.surface.select(self.id);
        self.surface.copy_selection()
    }
}

impl<S: StagingSurface + ?Sized> Drop for StagedText<'_, S> {
    fn drop(&mut self) {
        self.surface.detach(self.id);
    }
}

pub struct StagedCopy<S: StagingSurface> {
    surface: S,
}

impl<S: StagingSurface> StagedCopy<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }
}

impl<S: StagingSurface> CopyStrategy for StagedCopy<S> {
    fn name(&self) -> &'static str {
        "staged"
    }

    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut staged = StagedText::attach(&mut self.surface, text);
        staged.select_and_copy()
    }

    #[cfg(test)]
    fn staged_entries(&self) -> usize {
        self.surface.staged_count()
    }
}

/// Returns the preferred strategy when it is usable, `None` to use the fallback.
pub type StrategyDetector = Box<dyn FnMut() -> Option<Box<dyn CopyStrategy>>>;

pub fn system_detector(allow_system: bool) -> StrategyDetector {
    Box::new(move || {
        if !allow_system {
            return None;
        }
        match SystemClipboard::open() {
            Ok(clipboard) => Some(Box::new(clipboard) as Box<dyn CopyStrategy>),
            Err(err) => {
                tracing::info!("system clipboard not available, using staged copy: {err}");
                None
            }
        }
    })
}

pub struct ClipboardExporter {
    payload: Result<String, String>,
    detector: StrategyDetector,
    fallback: Box<dyn CopyStrategy>,
    confirmed_until: Option<Instant>,
}

impl ClipboardExporter {
    pub fn new(detector: StrategyDetector, fallback: Box<dyn CopyStrategy>) -> Self {
        let payload = shared::sample::sample_order_pretty().map_err(|err| err.to_string());
        Self {
            payload,
            detector,
            fallback,
            confirmed_until: None,
        }
    }

    pub fn copy_sample(&mut self, now: Instant) -> Result<(), ClipboardError> {
        let payload = self
            .payload
            .as_deref()
            .map_err(|err| ClipboardError::Payload(err.to_string()))?;

        let mut preferred = (self.detector)();
        let strategy = match preferred.as_deref_mut() {
            Some(strategy) => strategy,
            None => self.fallback.as_mut(),
        };
        let strategy_name = strategy.name();

        match strategy.copy_text(payload) {
            Ok(()) => {
                tracing::info!(strategy = strategy_name, "sample order copied");
                self.confirmed_until = Some(now + CONFIRMATION_INTERVAL);
                Ok(())
            }
            Err(err) => {
                tracing::error!(strategy = strategy_name, "copy error: {err}");
                Err(err)
            }
        }
    }

    pub fn button_label(&self, now: Instant) -> &'static str {
        match self.confirmed_until {
            Some(until) if now < until => COPIED_LABEL,
            _ => EXPORT_LABEL,
        }
    }

    pub fn confirmation_ends_at(&self) -> Option<Instant> {
        self.confirmed_until
    }

    #[cfg(test)]
    pub fn staged_entries(&self) -> usize {
        self.fallback.staged_entries()
    }
}
