//! Typed protocol events and their mapping onto wire frames.
//!
//! Outgoing (client to authority): `bounds`, `cursor`, `line`, `name`,
//! `color`, `message`. Incoming (authority to client): `name`, `users`,
//! `chunk`, `line`, `messages`, `message`. Each event travels as one
//! [`frames::Frame`] whose `event` field is the name above and whose `data`
//! is the JSON payload.

#[cfg(test)]
#[path = "protocol_test.rs"]
mod protocol_test;

use frames::Frame;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::chunk::{Chunk, Line};
use crate::geometry::{Bounds, ChunkId, Coordinate};
use crate::message::Message;
use crate::presence::User;

/// Error returned by [`Inbound::from_frame`].
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The frame names an event this client does not handle.
    #[error("unknown inbound event `{0}`")]
    UnknownEvent(String),
    /// The payload does not match the event's shape.
    #[error("invalid `{event}` payload: {source}")]
    Payload {
        event: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// An event this client sends to the authority.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Bounds(Bounds),
    Cursor(Coordinate),
    Line(Line),
    Name(String),
    Color(String),
    Message(String),
}

impl Outbound {
    /// Wire event name.
    #[must_use]
    pub fn event(&self) -> &'static str {
        match self {
            Self::Bounds(_) => "bounds",
            Self::Cursor(_) => "cursor",
            Self::Line(_) => "line",
            Self::Name(_) => "name",
            Self::Color(_) => "color",
            Self::Message(_) => "message",
        }
    }

    /// JSON payload.
    #[must_use]
    pub fn payload(&self) -> Value {
        match self {
            Self::Bounds(bounds) => to_value(bounds),
            Self::Cursor(cursor) => to_value(cursor),
            Self::Line(line) => to_value(line),
            Self::Name(text) | Self::Color(text) | Self::Message(text) => Value::String(text.clone()),
        }
    }

    /// Wrap into a fresh frame. The authority stamps the time.
    #[must_use]
    pub fn to_frame(&self) -> Frame {
        Frame::new(uuid::Uuid::new_v4().to_string(), 0, self.event(), self.payload())
    }
}

/// An event the authority sends to this client.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// Assigns or confirms the local user's name.
    Name(String),
    /// Full remote-user snapshot.
    Users(Vec<User>),
    /// A chunk entering the known set.
    Chunk(Chunk),
    /// A stroke appended to a known chunk.
    Line { chunk_id: ChunkId, line: Line },
    /// Chat history, sent once.
    Messages(Vec<Message>),
    /// One incremental chat entry.
    Message(Message),
}

#[derive(Serialize, Deserialize)]
struct LinePayload {
    chunk: ChunkId,
    line: Line,
}

impl Inbound {
    /// Wire event name.
    #[must_use]
    pub fn event(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Users(_) => "users",
            Self::Chunk(_) => "chunk",
            Self::Line { .. } => "line",
            Self::Messages(_) => "messages",
            Self::Message(_) => "message",
        }
    }

    /// Decode a typed event from a wire frame.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::UnknownEvent`] for an unhandled event name and
    /// [`ProtocolError::Payload`] when the payload has the wrong shape.
    pub fn from_frame(frame: &Frame) -> Result<Self, ProtocolError> {
        let data = &frame.data;
        match frame.event.as_str() {
            "name" => parse("name", data).map(Self::Name),
            "users" => parse("users", data).map(Self::Users),
            "chunk" => parse("chunk", data).map(Self::Chunk),
            "line" => parse::<LinePayload>("line", data)
                .map(|payload| Self::Line { chunk_id: payload.chunk, line: payload.line }),
            "messages" => parse("messages", data).map(Self::Messages),
            "message" => parse("message", data).map(Self::Message),
            other => Err(ProtocolError::UnknownEvent(other.to_owned())),
        }
    }

    /// JSON payload, as the authority would send it.
    #[must_use]
    pub fn payload(&self) -> Value {
        match self {
            Self::Name(name) => Value::String(name.clone()),
            Self::Users(users) => to_value(users),
            Self::Chunk(chunk) => to_value(chunk),
            Self::Line { chunk_id, line } => to_value(&LinePayload { chunk: chunk_id.clone(), line: line.clone() }),
            Self::Messages(messages) => to_value(messages),
            Self::Message(message) => to_value(message),
        }
    }

    /// Wrap into a frame, as the authority would send it.
    #[must_use]
    pub fn to_frame(&self) -> Frame {
        Frame::new(uuid::Uuid::new_v4().to_string(), 0, self.event(), self.payload())
    }
}

fn parse<T: DeserializeOwned>(event: &'static str, data: &Value) -> Result<T, ProtocolError> {
    T::deserialize(data).map_err(|source| ProtocolError::Payload { event, source })
}

/// A payload that fails to serialize is sent as `null`.
fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|err| {
        tracing::warn!(error = %err, payload = std::any::type_name::<T>(), "payload serialization failed; sending null");
        Value::Null
    })
}
