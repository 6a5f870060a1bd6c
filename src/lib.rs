//! voxctl - open and close applications by voice
//!
//! voxctl listens for short spoken commands like "open notepad" or
//! "close chrome", works out which installed application or running
//! processes the name refers to, and asks the OS to start or stop them.
//!
//! ## Pieces
//!
//! 1. **Input** ([`voice`]): microphone capture and transcription, or plain
//!    text lines for use without a microphone.
//! 2. **Interpreter** ([`interpreter`]): turns a transcript into an intent.
//! 3. **Resolver** ([`resolver`]): ordered launch and terminate strategies
//!    over the OS adapters in [`platform`].
//! 4. **Session** ([`session`]): the listen/act/report loop.

pub mod config;
pub mod domain;
pub mod interpreter;
pub mod platform;
pub mod resolver;
pub mod session;
pub mod voice;

pub use domain::*;
