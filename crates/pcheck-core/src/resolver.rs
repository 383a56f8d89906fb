//! Tracking-code lookup on the embedding `<script>` tag

use crate::config::{SCRIPT_ELEMENT_ID, TRACKING_CODE_ATTRIBUTE};
use crate::error::BeaconResult;
use crate::log::Diagnostics;

/// Read access to the page that embeds the beacon
pub trait EmbeddingContext {
    /// Value of `attribute` on the element with id `element_id`.
    ///
    /// `Ok(None)` means the element exists but the attribute is unset;
    /// a missing element is an error.
    fn element_attribute(&self, element_id: &str, attribute: &str) -> BeaconResult<Option<String>>;

    /// `location.pathname`
    fn page_path(&self) -> String;

    /// `location.hostname`
    fn page_host(&self) -> String;
}

/// Message printed when the embedding tag cannot be found.
pub fn missing_id_hint() -> String {
    format!(
        "Add id=\"{}\" to the <script> tag that loads this beacon",
        SCRIPT_ELEMENT_ID
    )
}

/// Resolve the tracking code, never failing.
///
/// Lookup errors print to the error channel followed by the integrator hint
/// (always, log switch or not) and resolve to `None`.
pub fn resolve_tracking_code<E: EmbeddingContext + ?Sized>(
    context: &E,
    diagnostics: &Diagnostics,
) -> Option<String> {
    match context.element_attribute(SCRIPT_ELEMENT_ID, TRACKING_CODE_ATTRIBUTE) {
        Ok(code) => code,
        Err(e) => {
            tracing::warn!(error = %e, "tracking code lookup failed");
            diagnostics.hint_error(&e.to_string());
            diagnostics.hint(&missing_id_hint());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::LogSwitch;
    use crate::testing::{MemoryConsole, StaticEmbedding};
    use std::rc::Rc;

    fn diagnostics(enabled: bool) -> (Diagnostics, Rc<MemoryConsole>) {
        let console = Rc::new(MemoryConsole::default());
        (Diagnostics::new(LogSwitch::new(enabled), console.clone()), console)
    }

    #[test]
    fn test_reads_attribute() {
        let (diag, console) = diagnostics(false);
        let page = StaticEmbedding::with_code("abc123");
        assert_eq!(resolve_tracking_code(&page, &diag).as_deref(), Some("abc123"));
        assert!(console.lines().is_empty());
    }

    #[test]
    fn test_unset_attribute_is_absent_without_hint() {
        let (diag, console) = diagnostics(true);
        let page = StaticEmbedding::without_attribute();
        assert_eq!(resolve_tracking_code(&page, &diag), None);
        assert!(console.lines().is_empty());
    }

    #[test]
    fn test_missing_element_prints_hint_even_when_logging_is_off() {
        let (diag, console) = diagnostics(false);
        let page = StaticEmbedding::without_element();
        assert_eq!(resolve_tracking_code(&page, &diag), None);

        let lines = console.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("error: "));
        assert!(lines[0].contains(SCRIPT_ELEMENT_ID));
        assert!(lines[1].starts_with("log: "));
        assert!(lines[1].contains("id=\"performance-check-script\""));
    }

    #[test]
    fn test_empty_attribute_is_returned_verbatim() {
        let (diag, _console) = diagnostics(false);
        let page = StaticEmbedding::with_code("");
        assert_eq!(resolve_tracking_code(&page, &diag).as_deref(), Some(""));
    }
}
