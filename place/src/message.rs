//! Chat message variants.
//!
//! Messages are tagged on the wire by `type`: a participant's chat line
//! (`user`), or a presence log line (`join` / `leave`).

#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;

use serde::{Deserialize, Serialize};

/// One entry in the chat log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    /// A chat line written by a participant.
    User {
        name: String,
        color: String,
        body: String,
        /// Set on the optimistic local echo of a message this client sent.
        #[serde(default, rename = "fromSelf", skip_serializing_if = "std::ops::Not::not")]
        from_self: bool,
    },
    /// A participant joined.
    Join { name: String },
    /// A participant left.
    Leave { name: String },
}

impl Message {
    /// The optimistic local echo of a message sent by this client.
    #[must_use]
    pub fn from_self(name: impl Into<String>, color: impl Into<String>, body: impl Into<String>) -> Self {
        Self::User { name: name.into(), color: color.into(), body: body.into(), from_self: true }
    }

    #[must_use]
    pub fn join(name: impl Into<String>) -> Self {
        Self::Join { name: name.into() }
    }

    #[must_use]
    pub fn leave(name: impl Into<String>) -> Self {
        Self::Leave { name: name.into() }
    }

    /// Display name of the participant the message is about.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::User { name, .. } | Self::Join { name } | Self::Leave { name } => name,
        }
    }

    #[must_use]
    pub fn is_from_self(&self) -> bool {
        matches!(self, Self::User { from_self: true, .. })
    }

    /// Identity of a chat line for echo matching; `None` for log lines.
    #[must_use]
    pub fn identity(&self) -> Option<MessageIdentity> {
        match self {
            Self::User { name, color, body, .. } => Some(MessageIdentity {
                name: name.clone(),
                color: color.clone(),
                body: body.clone(),
            }),
            Self::Join { .. } | Self::Leave { .. } => None,
        }
    }
}

/// Author, color, and body of a chat line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageIdentity {
    pub name: String,
    pub color: String,
    pub body: String,
}
