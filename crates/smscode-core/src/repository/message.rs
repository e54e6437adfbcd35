//! Message source trait definition.

use std::future::Future;
use std::ops::ControlFlow;

use smscode_types::error::StorageError;
use smscode_types::message::Message;

/// Read-only, ordered access to recent SMS messages.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait MessageSource: Send + Sync {
    /// Visit up to `limit` SMS messages, newest first.
    ///
    /// `visit` is called sequentially, once per message, in store order.
    /// Returning `ControlFlow::Break` stops the traversal without reading
    /// further rows. Store errors are returned as-is; nothing is retried.
    fn for_each_recent_message<F>(
        &self,
        limit: u32,
        visit: F,
    ) -> impl Future<Output = Result<(), StorageError>> + Send
    where
        F: FnMut(Message) -> ControlFlow<()> + Send;
}
