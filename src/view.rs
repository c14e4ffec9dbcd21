//! Output region and trigger control state.

use crate::render;
use crate::templates;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

pub const IDLE_LABEL: &str = "Generate Lyrics";
pub const BUSY_LABEL: &str = "Generating...";

/// Number of past panel states kept for inspection.
pub const PANEL_HISTORY_LIMIT: usize = 8;

/// The visible results region. Each update replaces its content entirely.
pub struct ResultsPanel {
    current: Mutex<String>,
    history: Mutex<VecDeque<String>>,
}

impl ResultsPanel {
    pub fn new() -> Self {
        let welcome = render::welcome_html();
        Self {
            current: Mutex::new(welcome.clone()),
            history: Mutex::new(VecDeque::from([welcome])),
        }
    }

    pub fn set_html(&self, html: String) {
        let mut history = self.history.lock().unwrap();
        if history.len() == PANEL_HISTORY_LIMIT {
            history.pop_front();
        }
        history.push_back(html.clone());
        *self.current.lock().unwrap() = html;
    }

    pub fn html(&self) -> String {
        self.current.lock().unwrap().clone()
    }

    /// The most recent states the panel has shown, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history.lock().unwrap().iter().cloned().collect()
    }
}

impl Default for ResultsPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// The generate button. Disabled while a request is in flight.
pub struct GenerateButton {
    in_flight: AtomicBool,
    disable_count: AtomicUsize,
    enable_count: AtomicUsize,
}

impl GenerateButton {
    pub fn new() -> Self {
        Self {
            in_flight: AtomicBool::new(false),
            disable_count: AtomicUsize::new(0),
            enable_count: AtomicUsize::new(0),
        }
    }

    /// Disable the button. Returns false if it was already disabled.
    pub fn try_begin(&self) -> bool {
        let acquired = self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if acquired {
            self.disable_count.fetch_add(1, Ordering::Relaxed);
        }
        acquired
    }

    pub fn finish(&self) {
        if self.in_flight.swap(false, Ordering::AcqRel) {
            self.enable_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.in_flight.load(Ordering::Acquire)
    }

    pub fn label(&self) -> &'static str {
        if self.is_enabled() {
            IDLE_LABEL
        } else {
            BUSY_LABEL
        }
    }

    pub fn disable_count(&self) -> usize {
        self.disable_count.load(Ordering::Relaxed)
    }

    pub fn enable_count(&self) -> usize {
        self.enable_count.load(Ordering::Relaxed)
    }
}

impl Default for GenerateButton {
    fn default() -> Self {
        Self::new()
    }
}

/// Standalone HTML document wrapping the current panel and button state.
pub struct Page<'a> {
    pub query: &'a str,
    pub button: &'a GenerateButton,
    pub results: String,
}

impl Page<'_> {
    pub fn to_html(&self) -> String {
        let enabled = self.button.is_enabled();
        templates::render(
            templates::PAGE,
            &[
                ("title", "Lyric Generator"),
                ("query", &render::escape_html(self.query)),
                ("disabled", if enabled { "" } else { " disabled" }),
                ("button_label", self.button.label()),
                ("spinner_display", if enabled { "none" } else { "inline-block" }),
                ("results", &self.results),
            ],
        )
    }
}
