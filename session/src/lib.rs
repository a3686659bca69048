//! dirmap Session
//!
//! Directory access. Responsibilities:
//! - The DirectorySession boundary implemented by protocol clients
//! - Adding, deleting and searching entries through a session
//! - Connection configuration

mod config;
mod directory;
mod error;
mod session;

pub use config::Config;
pub use directory::Directory;
pub use error::{ConfigError, SessionError, SessionResult};
pub use session::{DirectorySession, ProtocolEntry, SearchScope};
