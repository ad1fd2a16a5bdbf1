//! Message Notifier: one transient status message with auto-dismiss.

use std::time::{Duration, Instant};

/// Default time a notice stays visible.
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

/// A user-visible status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Success,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

#[derive(Debug)]
pub struct Notifier {
    duration: Duration,
    current: Option<(Notice, Instant)>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_DURATION)
    }
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            current: None,
        }
    }

    /// Shows `notice`, replacing any visible one and restarting the timer.
    pub fn show(&mut self, notice: Notice, now: Instant) {
        tracing::debug!(kind = ?notice.kind, text = %notice.text, "notice");
        self.current = Some((notice, now));
    }

    /// Hides the notice once its display time has elapsed.
    /// Returns true if a notice was dismissed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|(_, shown_at)| now.saturating_duration_since(*shown_at) >= self.duration);
        if expired {
            self.current = None;
        }
        expired
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref().map(|(notice, _)| notice)
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
