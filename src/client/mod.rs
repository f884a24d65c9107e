//! Player-side pieces: HTTP client, local board, move submission and the poll loop.

pub mod api;
pub mod driver;
pub mod game;
pub mod identity;
pub mod poller;

use thiserror::Error;

pub use api::GameClient;
pub use driver::play_move;
pub use game::{LocalGame, MoveRefusal};
pub use identity::ClientIdentity;
pub use poller::{spawn_poll_loop, PollHandle};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Rejected(String),
    #[error("unexpected response: {0}")]
    Unexpected(String),
    #[error("invalid position: {0}")]
    BadPosition(String),
}
