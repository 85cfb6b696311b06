//! Programs-as-data (PAD): the bidirectional codec between ASTs and a
//! canonical list-encoded representation (spec §4.7), plus its textual
//! renderer.

mod codec;
mod display;

pub use codec::{from_pad, to_pad, Pad, PadDecodeError, PadEncodeError};
pub use display::{display_pad, PadFormat};
