//! Screen host boundary
//!
//! The workflow never renders anything. It hands short-lived notices and
//! navigation requests to whoever hosts the transfer screen.

use std::fmt;
use std::time::Duration;

use tracing::{info, warn};

pub const NOT_FOUND_TEXT: &str = "Benefit not found.";
pub const INVALID_FORM_TEXT: &str = "Fix the errors in the form.";
pub const SAME_ENTITY_TEXT: &str = "Cannot transfer to the same benefit.";
pub const SUCCESS_TEXT: &str = "Transfer completed successfully!";
pub const GENERIC_FAILURE_TEXT: &str = "Transfer could not be completed.";
pub const TIMEOUT_TEXT: &str =
    "The transfer request timed out. Check the balances before trying again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient message shown to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub duration: Duration,
}

impl Notice {
    pub fn success(text: impl Into<String>, duration: Duration) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
            duration,
        }
    }

    pub fn error(text: impl Into<String>, duration: Duration) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
            duration,
        }
    }

    pub fn not_found() -> Self {
        Self::error(NOT_FOUND_TEXT, Duration::from_secs(5))
    }

    pub fn invalid_form() -> Self {
        Self::error(INVALID_FORM_TEXT, Duration::from_secs(4))
    }

    pub fn same_entity() -> Self {
        Self::error(SAME_ENTITY_TEXT, Duration::from_secs(4))
    }

    pub fn transfer_succeeded() -> Self {
        Self::success(SUCCESS_TEXT, Duration::from_secs(5))
    }

    pub fn transfer_failed(reason: Option<&str>) -> Self {
        Self::error(
            reason.unwrap_or(GENERIC_FAILURE_TEXT),
            Duration::from_secs(6),
        )
    }

    pub fn transfer_timed_out() -> Self {
        Self::error(TIMEOUT_TEXT, Duration::from_secs(6))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.level, self.text)
    }
}

/// Screens the workflow can send the operator to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Benefit listing
    Listing,
}

/// Whoever hosts the transfer screen
pub trait ScreenHost: Send + Sync {
    fn notify(&self, notice: Notice);

    fn navigate(&self, route: Route);
}

/// Host that writes notices and navigation to the log (headless runs)
#[derive(Debug, Default)]
pub struct TracingHost;

impl ScreenHost for TracingHost {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => warn!(text = %notice.text, "notice"),
            NoticeLevel::Success => info!(text = %notice.text, "notice"),
        }
    }

    fn navigate(&self, route: Route) {
        info!(route = ?route, "navigate");
    }
}

/// Host that records everything for assertions
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct RecordingHost {
        notices: Mutex<Vec<Notice>>,
        routes: Mutex<Vec<Route>>,
    }

    impl RecordingHost {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn notices(&self) -> Vec<Notice> {
            self.notices.lock().unwrap().clone()
        }

        pub fn last_notice(&self) -> Option<Notice> {
            self.notices.lock().unwrap().last().cloned()
        }

        pub fn routes(&self) -> Vec<Route> {
            self.routes.lock().unwrap().clone()
        }
    }

    impl ScreenHost for RecordingHost {
        fn notify(&self, notice: Notice) {
            self.notices.lock().unwrap().push(notice);
        }

        fn navigate(&self, route: Route) {
            self.routes.lock().unwrap().push(route);
        }
    }
}

#[cfg(test)]
pub use mock::RecordingHost;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_notice_prefers_server_reason() {
        let notice = Notice::transfer_failed(Some("limite diário excedido"));
        assert_eq!(notice.text, "limite diário excedido");
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.duration, Duration::from_secs(6));

        assert_eq!(Notice::transfer_failed(None).text, GENERIC_FAILURE_TEXT);
    }

    #[test]
    fn test_recording_host() {
        let host = RecordingHost::new();
        host.notify(Notice::not_found());
        host.navigate(Route::Listing);

        assert_eq!(host.last_notice().unwrap().text, NOT_FOUND_TEXT);
        assert_eq!(host.routes(), vec![Route::Listing]);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Notice::same_entity().to_string(),
            "[Error] Cannot transfer to the same benefit."
        );
    }
}
