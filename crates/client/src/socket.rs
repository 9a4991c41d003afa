use crate::TransportError;
use doudizhu_core::{ActionRequest, ServerEvent};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};
use url::Url;

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type WsStream = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// JSON text frames, `{"event": .., "data": ..}` both ways, delivered in
/// send order per connection.
pub struct SocketClient {
    sink: WsSink,
    stream: WsStream,
}

impl SocketClient {
    pub async fn connect(url: &str) -> Result<Self, TransportError> {
        let url = Url::parse(url)?;
        let connect = connect_async(url.as_str());
        let (socket, _response) = tokio::time::timeout(CONNECT_TIMEOUT, connect)
            .await
            .map_err(|_| TransportError::ConnectTimeout(CONNECT_TIMEOUT))??;
        debug!(%url, "websocket connected");
        let (sink, stream) = socket.split();
        Ok(Self { sink, stream })
    }

    pub fn split(self) -> (ActionSink, EventStream) {
        (ActionSink { sink: self.sink }, EventStream { stream: self.stream })
    }
}

/// Outbound half: player actions only, everything else goes over HTTP.
pub struct ActionSink {
    sink: WsSink,
}

impl ActionSink {
    pub async fn send(&mut self, request: &ActionRequest) -> Result<(), TransportError> {
        let frame = request.to_frame();
        debug!(player = %request.player, frame, "sending player_action");
        self.sink.send(Message::Text(frame)).await?;
        Ok(())
    }

    pub async fn close(mut self) -> Result<(), TransportError> {
        self.sink.send(Message::Close(None)).await?;
        Ok(())
    }
}

/// Inbound half: decoded server events in delivery order.
pub struct EventStream {
    stream: WsStream,
}

impl EventStream {
    /// `Ok(None)` on a clean close. A frame that fails to decode is an error
    /// for that event only; the stream stays usable.
    pub async fn next_event(&mut self) -> Result<Option<ServerEvent>, TransportError> {
        while let Some(message) = self.stream.next().await {
            match message? {
                Message::Text(text) => {
                    let event = ServerEvent::from_json(&text)?;
                    debug!(event = event.name(), "server event");
                    return Ok(Some(event));
                }
                Message::Close(frame) => {
                    debug!(?frame, "server closed the connection");
                    return Ok(None);
                }
                // Pongs are answered by tungstenite internally.
                Message::Ping(_) | Message::Pong(_) => continue,
                other => {
                    warn!(?other, "ignoring non-text frame");
                    continue;
                }
            }
        }
        Ok(None)
    }
}
