//! Transient notices and the one-active-view switcher shared by every screen.

use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_millis(4000);
/// Cart feedback is short-lived.
pub const BRIEF_NOTICE_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
            NoticeKind::Info => "info",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    pub expires_at: Instant,
}

/// Holds at most one notice; a new one replaces the old.
#[derive(Debug)]
pub struct NoticeBoard {
    current: Option<Notice>,
    default_duration: Duration,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_DURATION)
    }
}

impl NoticeBoard {
    pub fn new(default_duration: Duration) -> Self {
        Self { current: None, default_duration }
    }

    pub fn notify(&mut self, message: impl Into<String>, kind: NoticeKind, duration: Option<Duration>) -> &Notice {
        let expires_at = Instant::now() + duration.unwrap_or(self.default_duration);
        self.current.insert(Notice { message: message.into(), kind, expires_at })
    }

    pub fn success(&mut self, message: impl Into<String>) -> &Notice {
        self.notify(message, NoticeKind::Success, None)
    }

    pub fn error(&mut self, message: impl Into<String>) -> &Notice {
        self.notify(message, NoticeKind::Error, None)
    }

    pub fn info(&mut self, message: impl Into<String>) -> &Notice {
        self.notify(message, NoticeKind::Info, None)
    }

    /// The current notice, unless it has expired by `now`.
    pub fn visible(&self, now: Instant) -> Option<&Notice> {
        self.current.as_ref().filter(|notice| now < notice.expires_at)
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

/// Exactly one of a fixed set of views is active.
#[derive(Debug, Clone)]
pub struct ViewSwitcher {
    views: Vec<&'static str>,
    active: usize,
}

impl ViewSwitcher {
    /// The first view starts active. `views` must not be empty.
    pub fn new(views: &[&'static str]) -> Self {
        Self { views: views.to_vec(), active: 0 }
    }

    pub fn active(&self) -> Option<&'static str> {
        self.views.get(self.active).copied()
    }

    pub fn is_active(&self, view: &str) -> bool {
        self.active() == Some(view)
    }

    /// Activates `target` and deactivates the rest. Unknown targets change
    /// nothing and return false.
    pub fn switch_view(&mut self, target: &str) -> bool {
        match self.views.iter().position(|view| *view == target) {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }

    pub fn views(&self) -> &[&'static str] {
        &self.views
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_notice_expires_after_its_duration() {
        let mut board = NoticeBoard::default();
        board.success("Product saved");

        assert!(board.visible(Instant::now()).is_some());

        tokio::time::advance(Duration::from_millis(3999)).await;
        assert!(board.visible(Instant::now()).is_some());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(board.visible(Instant::now()).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_notice_replaces_old() {
        let mut board = NoticeBoard::new(Duration::from_secs(1));
        board.info("Loading");
        board.notify("Out of stock", NoticeKind::Error, Some(Duration::from_secs(10)));

        tokio::time::advance(Duration::from_secs(5)).await;
        let notice = board.visible(Instant::now()).unwrap();
        assert_eq!(notice.message, "Out of stock");
        assert_eq!(notice.kind, NoticeKind::Error);
    }

    #[test]
    fn test_switch_view_activates_exactly_one() {
        let mut views = ViewSwitcher::new(&["sales", "users", "employees"]);
        assert!(views.is_active("sales"));

        assert!(views.switch_view("employees"));
        assert!(views.is_active("employees"));
        assert!(!views.is_active("sales"));

        assert!(!views.switch_view("reports"));
        assert_eq!(views.active(), Some("employees"));
    }
}
