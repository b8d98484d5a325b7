use crate::error::TransportError;
use crate::transport::{Frame, FrameReader, FrameWriter};
use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};

pub struct WsReader(SplitStream<WebSocket>);

pub struct WsWriter(SplitSink<WebSocket, Message>);

/// Split an upgraded socket into the halves the peer loops work with.
pub fn split_socket(socket: WebSocket) -> (WsReader, WsWriter) {
    let (sink, stream) = socket.split();
    (WsReader(stream), WsWriter(sink))
}

#[async_trait]
impl FrameReader for WsReader {
    async fn next_frame(&mut self) -> Option<Result<Frame, TransportError>> {
        loop {
            match self.0.next().await? {
                Ok(Message::Text(text)) => return Some(Ok(text)),
                Ok(Message::Binary(data)) => {
                    return Some(Ok(String::from_utf8_lossy(&data).into_owned().into()));
                }
                Ok(Message::Close(_)) => return None,
                Ok(Message::Ping(_) | Message::Pong(_)) => continue,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

#[async_trait]
impl FrameWriter for WsWriter {
    async fn send_frame(&mut self, frame: Frame) -> Result<(), TransportError> {
        self.0
            .send(Message::Text(frame))
            .await
            .map_err(TransportError::from)
    }

    async fn close(&mut self) {
        let _ = self.0.close().await;
    }
}
