use std::sync::Arc;
use crate::net::enums::message_error_code::MessageErrorCode;
use crate::net::structs::message::Message;
use crate::net::structs::session::Session;

/// Event sink for a Connector or Acceptor.
///
/// All callbacks are dispatched by the loop that owns the session, except
/// `session_closed`, which a `disconnect()` caller may also fire; the
/// session's closed flag guarantees it is delivered at most once either
/// way. Per session the lifecycle order is `created → opened → closed →
/// destroyed`. Implementations must not block: a slow sink stalls every
/// session on that loop.
pub trait MessageHandler: Send + Sync {
    fn session_created(&self, session: &Arc<Session>);

    fn session_opened(&self, session: &Arc<Session>);

    /// Fired at most once per session lifetime.
    fn session_closed(&self, session: &Arc<Session>);

    fn session_destroyed(&self, session: &Arc<Session>);

    fn message_received(&self, session: &Arc<Session>, message: Message);

    fn message_sent(&self, session: &Arc<Session>, message: Message);

    fn error_occurred(&self, code: MessageErrorCode, session: &Arc<Session>);
}
