//! Presentation seam.
//!
//! Adapters never render anything themselves; they push values into named
//! regions of a `Presenter` supplied by the host. `TracingPresenter` is the
//! headless implementation used by the binary.

use serde_json::Value;

/// Region that receives whole envelopes nobody else understands.
pub const GENERIC_REGION: &str = "output";

pub trait Presenter: Send + Sync {
    /// Render a JSON value into `region`.
    fn show(&self, region: &str, value: &Value);
    /// Render the list of soundcards offered by an audio gateway.
    fn show_soundcards(&self, cards: &[String]);
    /// Fill a single text field.
    fn show_field(&self, field: &str, value: &str);
    /// Set the current value of a selector.
    fn select(&self, selector: &str, value: &str);
}

/// Logs every rendering call.
#[derive(Debug, Clone)]
pub struct TracingPresenter {
    feature: &'static str,
}

impl TracingPresenter {
    pub fn new(feature: &'static str) -> Self {
        Self { feature }
    }
}

impl Presenter for TracingPresenter {
    fn show(&self, region: &str, value: &Value) {
        tracing::info!(feature = self.feature, region, %value, "show");
    }

    fn show_soundcards(&self, cards: &[String]) {
        tracing::info!(feature = self.feature, ?cards, "soundcards");
    }

    fn show_field(&self, field: &str, value: &str) {
        tracing::info!(feature = self.feature, field, value, "field");
    }

    fn select(&self, selector: &str, value: &str) {
        tracing::info!(feature = self.feature, selector, value, "select");
    }
}
