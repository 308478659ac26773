//! Notification capability and the toast queue backing it.
//!
//! The client and the pagination controller only see the [`Notifier`] trait.
//! The terminal shell hands them a [`ToastQueue`], which the view drains when
//! drawing the toast stack.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Maximum number of toasts displayed at once.
pub const MAX_VISIBLE_TOASTS: usize = 5;

/// Default lifetime of a toast.
pub const DEFAULT_TOAST_TIMEOUT: Duration = Duration::from_millis(3000);

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Progress information
    Info,
    /// A request succeeded
    Success,
    /// Recoverable problem
    Warning,
    /// An operation failed
    Failure,
}

/// Fire-and-forget user notifications.
///
/// Implementations must be shareable across threads: the HTTP client emits
/// notifications from a runtime worker while the UI thread drains them.
pub trait Notifier: Send + Sync {
    /// Show a message with the given severity.
    fn notify(&self, severity: Severity, message: &str);

    /// Notify with [`Severity::Info`].
    fn info(&self, message: &str) {
        self.notify(Severity::Info, message);
    }

    /// Notify with [`Severity::Success`].
    fn success(&self, message: &str) {
        self.notify(Severity::Success, message);
    }

    /// Notify with [`Severity::Warning`].
    fn warning(&self, message: &str) {
        self.notify(Severity::Warning, message);
    }

    /// Notify with [`Severity::Failure`].
    fn failure(&self, message: &str) {
        self.notify(Severity::Failure, message);
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, severity: Severity, message: &str) {
        (**self).notify(severity, message);
    }
}

/// A single displayed notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Display style
    pub severity: Severity,
    /// Text shown
    pub message: String,
    /// When the toast was queued
    pub created_at: Instant,
}

impl Toast {
    /// Check whether the toast outlived `timeout` at `now`.
    pub fn is_expired(&self, now: Instant, timeout: Duration) -> bool {
        now.saturating_duration_since(self.created_at) >= timeout
    }
}

/// Thread-safe toast queue. Clones share the same queue.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    inner: Arc<Mutex<VecDeque<Toast>>>,
    timeout: Duration,
}

impl ToastQueue {
    /// Create an empty queue whose toasts live for `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
            timeout,
        }
    }

    /// Drop expired toasts and return the ones still on screen, oldest first.
    ///
    /// At most [`MAX_VISIBLE_TOASTS`] are returned; older ones are discarded
    /// first when the stack overflows.
    pub fn visible(&self, now: Instant) -> Vec<Toast> {
        let mut queue = self.lock();
        let timeout = self.timeout;
        queue.retain(|toast| !toast.is_expired(now, timeout));
        while queue.len() > MAX_VISIBLE_TOASTS {
            queue.pop_front();
        }
        queue.iter().cloned().collect()
    }

    /// Number of toasts currently queued, expired ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when no toast is queued, expired or not.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Toast>> {
        // A panic while holding the lock cannot leave a VecDeque of owned
        // toasts in an invalid state.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TIMEOUT)
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info | Severity::Success => info!(?severity, "{message}"),
            Severity::Warning => warn!("{message}"),
            Severity::Failure => error!("{message}"),
        }

        self.lock().push_back(Toast {
            severity,
            message: message.to_string(),
            created_at: Instant::now(),
        });
    }
}
