//! Client-side synchronization engine for a shared, unbounded drawing place.
//!
//! Many participants draw on one effectively infinite canvas. Each client sees
//! only a local viewport and stays in sync with a remote authority over a
//! persistent named-event connection. This crate is that client's engine: it
//! chunks the world spatially, negotiates viewport bounds, integrates keyboard
//! movement once per frame, draws optimistically, and keeps the chat join line
//! ordered after history.
//!
//! The engine performs no I/O of its own. Drawing, transport, DOM-style event
//! listeners, frame scheduling, and the host UI are injected through the traits
//! in [`render`], [`transport`], [`platform`], and [`host`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`place`] | The [`place::Place`] coordinator: lifecycle and public contract |
//! | [`geometry`] | Coordinates, bounds, and chunk-id derivation |
//! | [`chunk`] | Lines, chunks, and the spatial [`chunk::ChunkStore`] |
//! | [`render`] | The [`render::Surface`] seam and the stateless drawing engine |
//! | [`viewport`] | Location/bounds state and keyboard movement integration |
//! | [`input`] | Movement keys and input focus |
//! | [`presence`] | Local user and the remote user snapshot |
//! | [`message`] | Chat message variants |
//! | [`chat`] | History/join ordering for chat delivery |
//! | [`echo`] | Optional deduplication of the authority echoing our own events |
//! | [`protocol`] | Typed inbound/outbound events and their frame encoding |
//! | [`transport`] | The [`transport::Transport`] seam and a channel-backed implementation |
//! | [`host`] | The [`host::PlaceHost`] observer pushed to by the engine |
//! | [`platform`] | Listener and per-frame scheduling seams, decoded input events, and the late-bound [`platform::PlaceSlot`] |
//! | [`config`] | [`config::PlaceConfig`] |
//! | [`consts`] | Shared numeric constants |
//! | `web` | (wasm32) Canvas surface, DOM listeners, `requestAnimationFrame` clock, and `mount` |

pub mod chat;
pub mod chunk;
pub mod config;
pub mod consts;
pub mod echo;
pub mod geometry;
pub mod host;
pub mod input;
pub mod message;
pub mod place;
pub mod platform;
pub mod presence;
pub mod protocol;
pub mod render;
pub mod transport;
pub mod viewport;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
mod testing;

pub use place::{Place, PlaceParts};
