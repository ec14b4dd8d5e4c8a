//! One connection to the authority, driving a [`Place`] on the current thread.
//!
//! The loop multiplexes four sources: frames the engine queued for sending,
//! frames arriving on the socket, the frame/script timer, and Ctrl-C. A bad
//! inbound frame is logged and dropped; only socket failures end the session
//! with an error.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::time::Duration;

use frames::Frame;
use futures_util::{FutureExt, Sink, SinkExt, StreamExt};
use place::config::PlaceConfig;
use place::geometry::{Coordinate, Size};
use place::transport::{ChannelTransport, FrameReceiver};
use place::{Place, PlaceParts};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::error::ClientError;
use crate::headless::{ConsoleHost, DetachedEvents, TickFrames, TraceSurface};
use crate::script::{Script, ScriptRunner, Step};

/// Ticks a script waits for history or the first chunk before acting anyway.
const SETTLE_TICKS: u32 = 120;

/// Everything needed to open a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub url: String,
    pub size: Size,
    pub initial_location: Option<Coordinate>,
    pub name: Option<String>,
    pub color: Option<String>,
    pub frame_interval: Duration,
    pub config: PlaceConfig,
}

/// A [`Place`] wired to headless seams, plus the handles the loop needs.
pub struct Engine {
    pub place: Place,
    pub outbound: FrameReceiver,
    pub frames: TickFrames,
    pub surface: TraceSurface,
    pub events: DetachedEvents,
}

impl Engine {
    /// Build and start the engine, then apply the local user's preferences.
    #[must_use]
    pub fn start(options: &SessionOptions) -> Self {
        let (transport, outbound) = ChannelTransport::channel();
        let frames = TickFrames::default();
        let surface = TraceSurface::new(options.size);
        let events = DetachedEvents::default();
        let mut place = Place::new(
            options.config.clone(),
            PlaceParts {
                surface: Box::new(surface.clone()),
                transport: Box::new(transport),
                events: Box::new(events.clone()),
                frames: Box::new(frames.clone()),
                host: Box::new(ConsoleHost),
            },
        );
        if let Some(location) = options.initial_location {
            place.set_initial_location(location);
        }
        if let Some(name) = &options.name {
            place.change_name(name);
        }
        if let Some(color) = &options.color {
            place.change_color(color);
        }
        Self { place, outbound, frames, surface, events }
    }

    /// Fire the pending frame, if the engine asked for one.
    pub fn tick(&mut self) {
        if self.frames.take().is_some() {
            self.place.on_frame();
        }
    }

    /// Decode and apply one socket message. Bad frames are logged and dropped.
    pub fn receive(&mut self, message: Message) {
        let frame = match decode_message(message) {
            Ok(Some(frame)) => frame,
            Ok(None) => return,
            Err(error) => {
                tracing::warn!(%error, "dropping undecodable frame");
                return;
            }
        };
        if let Err(error) = self.place.receive_frame(&frame) {
            tracing::warn!(%error, event = %frame.event, "dropping frame");
        }
    }

    /// Frames already queued for sending.
    pub fn drain(&mut self) -> Vec<Frame> {
        let mut queued = Vec::new();
        while let Some(Some(frame)) = self.outbound.next().now_or_never() {
            queued.push(frame);
        }
        queued
    }
}

/// Binary frames are protobuf; text frames are the same envelope as JSON.
///
/// # Errors
///
/// Returns the codec or JSON error for a malformed frame.
pub fn decode_message(message: Message) -> Result<Option<Frame>, ClientError> {
    match message {
        Message::Binary(bytes) => Ok(Some(frames::decode_frame(&bytes)?)),
        Message::Text(text) => Ok(Some(serde_json::from_str(text.as_str())?)),
        _ => Ok(None),
    }
}

/// Only websocket URLs are accepted.
///
/// # Errors
///
/// Returns [`ClientError::InvalidUrl`] for any other scheme.
pub fn validate_url(url: &str) -> Result<(), ClientError> {
    if url.starts_with("ws://") || url.starts_with("wss://") {
        return Ok(());
    }
    Err(ClientError::InvalidUrl(url.to_owned()))
}

/// Connect, run `script` until it finishes or the user interrupts, then stop.
///
/// # Errors
///
/// Returns [`ClientError`] when the URL is invalid or the socket fails.
pub async fn run(options: SessionOptions, script: Script) -> Result<(), ClientError> {
    validate_url(&options.url)?;
    let (mut socket, _) = connect_async(options.url.as_str())
        .await
        .map_err(|error| ClientError::Connect(Box::new(error)))?;
    tracing::info!(url = %options.url, "connected");

    let mut engine = Engine::start(&options);
    let mut runner = ScriptRunner::new(script, SETTLE_TICKS);
    let mut ticker = tokio::time::interval(options.frame_interval);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            Some(frame) = engine.outbound.next() => {
                send(&mut socket, &frame).await?;
            }
            incoming = socket.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("connection closed by authority");
                    break;
                }
                Some(Ok(message)) => engine.receive(message),
                Some(Err(error)) => return Err(ClientError::Receive(Box::new(error))),
            },
            _ = ticker.tick() => {
                engine.tick();
                if runner.step(&mut engine.place) == Step::Done {
                    break;
                }
            }
            _ = &mut shutdown => {
                tracing::info!("interrupted");
                break;
            }
        }
    }

    engine.place.stop();
    for frame in engine.drain() {
        send(&mut socket, &frame).await?;
    }
    if let Err(error) = socket.close(None).await {
        tracing::debug!(%error, "close handshake failed");
    }
    tracing::info!(
        strokes = engine.surface.strokes(),
        redraws = engine.surface.clears(),
        chunks = engine.place.chunks().len(),
        listeners = engine.events.active(),
        "session ended"
    );
    Ok(())
}

async fn send<S>(socket: &mut S, frame: &Frame) -> Result<(), ClientError>
where
    S: Sink<Message, Error = tokio_tungstenite::tungstenite::Error> + Unpin,
{
    tracing::trace!(event = %frame.event, "send");
    socket
        .send(Message::Binary(frames::encode_frame(frame).into()))
        .await
        .map_err(|error| ClientError::Send(Box::new(error)))
}
