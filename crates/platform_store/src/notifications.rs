//! Notification service contract and no-op adapter.

use std::{future::Future, pin::Pin};

/// Object-safe boxed future used by [`NotificationService`].
pub type NotificationFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for user-visible info/error messages requested by the
/// rendering surface.
pub trait NotificationService {
    /// Shows an informational message.
    fn show_info<'a>(&'a self, message: &'a str) -> NotificationFuture<'a, Result<(), String>>;

    /// Shows an error message.
    fn show_error<'a>(&'a self, message: &'a str) -> NotificationFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op notification service for unsupported targets.
pub struct NoopNotificationService;

impl NotificationService for NoopNotificationService {
    fn show_info<'a>(&'a self, _message: &'a str) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn show_error<'a>(&'a self, _message: &'a str) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}
