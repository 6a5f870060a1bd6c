//! Settings configuration types

mod resolver;
mod session;
mod voice;

pub use resolver::ResolverSettings;
pub use session::SessionSettings;
pub use voice::VoiceSettings;
