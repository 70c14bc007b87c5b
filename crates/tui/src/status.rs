//! Footer line: transient status messages over a fixed help text.

use std::time::{Duration, Instant};

/// Shown whenever no status message is active.
pub const HELP_TEXT: &str = "Navigate: Arrow keys · Details: Enter · Menu: Ctrl-A · Preview: Ctrl-D · Reload: r · Quit: q";

const INFO_TTL: Duration = Duration::from_secs(3);
const ERROR_TTL: Duration = Duration::from_secs(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Help,
    Info,
    Warning,
    Error,
}

impl StatusKind {
    fn ttl(self) -> Duration {
        match self {
            Self::Error => ERROR_TTL,
            _ => INFO_TTL,
        }
    }
}

#[derive(Debug, Clone)]
struct Status {
    kind: StatusKind,
    text: String,
    until: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct Footer {
    current: Option<Status>,
}

impl Footer {
    pub fn show(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.show_at(kind, text, Instant::now());
    }

    pub fn show_at(&mut self, kind: StatusKind, text: impl Into<String>, now: Instant) {
        self.current = Some(Status {
            kind,
            text: text.into(),
            until: now + kind.ttl(),
        });
    }

    /// Kind and text to draw at `now`.
    #[must_use]
    pub fn line_at(&self, now: Instant) -> (StatusKind, &str) {
        match &self.current {
            Some(s) if now < s.until => (s.kind, s.text.as_str()),
            _ => (StatusKind::Help, HELP_TEXT),
        }
    }

    #[must_use]
    pub fn line(&self) -> (StatusKind, &str) {
        self.line_at(Instant::now())
    }

    /// True while an error is still on screen.
    #[must_use]
    pub fn showing_error_at(&self, now: Instant) -> bool {
        self.line_at(now).0 == StatusKind::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_help() {
        assert_eq!(Footer::default().line(), (StatusKind::Help, HELP_TEXT));
    }

    #[test]
    fn test_info_expires_after_three_seconds() {
        let t0 = Instant::now();
        let mut f = Footer::default();
        f.show_at(StatusKind::Info, "Loading...", t0);
        assert_eq!(f.line_at(t0 + Duration::from_secs(2)), (StatusKind::Info, "Loading..."));
        assert_eq!(f.line_at(t0 + Duration::from_secs(3)).0, StatusKind::Help);
    }

    #[test]
    fn test_warning_uses_short_ttl() {
        let t0 = Instant::now();
        let mut f = Footer::default();
        f.show_at(StatusKind::Warning, "Failed to load wishlist", t0);
        assert_eq!(f.line_at(t0 + Duration::from_secs(4)).0, StatusKind::Help);
    }

    #[test]
    fn test_error_lingers_fifty_seconds() {
        let t0 = Instant::now();
        let mut f = Footer::default();
        f.show_at(StatusKind::Error, "boom", t0);
        assert!(f.showing_error_at(t0 + Duration::from_secs(49)));
        assert!(!f.showing_error_at(t0 + Duration::from_secs(50)));
    }

    #[test]
    fn test_newer_message_replaces_older() {
        let t0 = Instant::now();
        let mut f = Footer::default();
        f.show_at(StatusKind::Error, "boom", t0);
        f.show_at(StatusKind::Info, "ok", t0);
        assert_eq!(f.line_at(t0), (StatusKind::Info, "ok"));
    }
}
