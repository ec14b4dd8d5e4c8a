//! The host UI as seen from the engine.
//!
//! The engine pushes state outward through [`PlaceHost`]; the host never calls
//! back in except through the public contract of [`crate::Place`]. Every
//! method has an empty default body, so a host implements only what it shows
//! and a missing callback is simply not invoked.

use crate::geometry::Coordinate;
use crate::message::Message;
use crate::presence::User;

/// Observer of engine state changes.
pub trait PlaceHost {
    /// The authority assigned or confirmed the local user's name.
    fn set_name(&mut self, _name: &str) {}

    /// Full chat history, delivered once. The host owns the retained log.
    fn set_messages(&mut self, _messages: Vec<Message>) {}

    /// One chat entry to append after everything delivered so far.
    fn add_message(&mut self, _message: Message) {}

    /// The local user changed (name, color, or cursor).
    fn set_user(&mut self, _user: &User) {}

    /// A new remote user snapshot.
    fn set_users(&mut self, _users: &[User]) {}

    /// The viewport location changed.
    fn set_location(&mut self, _location: Coordinate) {}

    /// Whether chunks for a new location are still on their way.
    fn set_is_loading(&mut self, _loading: bool) {}
}

/// A host that shows nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Detached;

impl PlaceHost for Detached {}
