pub mod board;
pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod registry;
pub mod server;
pub mod session;

pub use board::{Board, GameOutcome, PlayerColor, STARTING_FEN};
pub use config::ServerArgs;
pub use error::{ApiError, SessionError};
pub use protocol::{ClientRequest, ServerResponse, SessionSnapshot};
pub use registry::{JoinedSession, RegistryOptions, SessionRegistry};
pub use session::Session;
