//! Server-Sent Events stream on `GET /sse`.
//!
//! Each client gets its own stream: the `initialized` announcement, the full
//! tool list, then a progress heartbeat every interval until the client goes
//! away. The stream never reads client input.

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::State,
    response::{
        IntoResponse,
        sse::{Event, Sse},
    },
};
use futures::{Stream, stream};
use tokio::time::{Instant, Interval, interval_at};
use tracing::{debug, error, info};

use super::AppState;
use crate::core::McpServer;
use crate::core::protocol::JsonRpcNotification;

/// Open a notification stream for one client.
pub async fn sse_handler(State(state): State<AppState>) -> impl IntoResponse {
    info!("SSE client connected");
    Sse::new(notification_stream(state.server, state.sse_heartbeat))
}

/// Where a stream is in its fixed sequence.
enum Stage {
    Initialized,
    ToolsList,
    Heartbeat(Interval),
    Closed,
}

/// Logs the disconnect when the response body is dropped.
struct ConnectionGuard;

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        info!("SSE client disconnected");
    }
}

struct Session {
    server: McpServer,
    period: Duration,
    stage: Stage,
    _guard: ConnectionGuard,
}

impl Session {
    /// Frame to send for an encoded notification. A failed encoding becomes a
    /// terminal error frame and the stream closes after it.
    fn frame(&mut self, encoded: Result<Event, serde_json::Error>) -> Event {
        match encoded {
            Ok(event) => event,
            Err(e) => {
                error!("Failed to encode SSE notification: {}", e);
                self.stage = Stage::Closed;
                error_event(&e.to_string())
            }
        }
    }
}

/// Build the per-client event stream.
///
/// The first heartbeat fires one full period after the tool list, not
/// immediately.
pub fn notification_stream(
    server: McpServer,
    period: Duration,
) -> impl Stream<Item = Result<Event, Infallible>> {
    session_stream(Session {
        server,
        period,
        stage: Stage::Initialized,
        _guard: ConnectionGuard,
    })
}

fn session_stream(session: Session) -> impl Stream<Item = Result<Event, Infallible>> {
    stream::unfold(session, |mut session| async move {
        let notification = match session.stage {
            Stage::Initialized => {
                session.stage = Stage::ToolsList;
                JsonRpcNotification::initialized(&session.server.identity())
            }
            Stage::ToolsList => {
                let period = session.period;
                session.stage = Stage::Heartbeat(interval_at(Instant::now() + period, period));
                JsonRpcNotification::tools_list_changed(session.server.list_tools())
            }
            Stage::Heartbeat(ref mut interval) => {
                interval.tick().await;
                debug!("SSE heartbeat");
                JsonRpcNotification::heartbeat()
            }
            Stage::Closed => return None,
        };

        let event = session.frame(encode(&notification));
        Some((Ok(event), session))
    })
}

fn encode(notification: &JsonRpcNotification) -> Result<Event, serde_json::Error> {
    serde_json::to_string(notification).map(|data| Event::default().data(data))
}

/// Terminal error frame.
fn error_event(message: &str) -> Event {
    let data = serde_json::to_string(&JsonRpcNotification::error(message)).unwrap_or_else(|_| {
        r#"{"jsonrpc":"2.0","method":"notifications/error","params":{"error":{"code":-32603,"message":"Internal error"}}}"#
            .to_string()
    });
    Event::default().data(data)
}
