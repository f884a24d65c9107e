use chrono::Duration;
use clap::Parser;

use crate::registry::RegistryOptions;

/// Upper bound for `--session-ttl-secs`: one hundred years.
pub const MAX_SESSION_TTL_SECS: u64 = 100 * 365 * 24 * 60 * 60;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Two-player chess session server", long_about = None)]
pub struct ServerArgs {
    /// Server host
    #[arg(long, env = "CHESS_DUEL_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "CHESS_DUEL_PORT", default_value = "3000")]
    pub port: u16,

    /// Evict sessions idle for longer than this many seconds (0 keeps them forever)
    #[arg(
        long,
        env = "CHESS_DUEL_SESSION_TTL_SECS",
        default_value = "86400",
        value_parser = clap::value_parser!(u64).range(..=MAX_SESSION_TTL_SECS)
    )]
    pub session_ttl_secs: u64,

    /// How often the idle-session sweeper runs
    #[arg(long, env = "CHESS_DUEL_SWEEP_INTERVAL_SECS", default_value = "300")]
    pub sweep_interval_secs: u64,

    /// Re-check every submitted position against the stored one
    #[arg(long, env = "CHESS_DUEL_VALIDATE_MOVES")]
    pub validate_moves: bool,
}

impl ServerArgs {
    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            validate_moves: self.validate_moves,
        }
    }

    pub fn session_ttl(&self) -> Option<Duration> {
        if self.session_ttl_secs == 0 {
            return None;
        }
        i64::try_from(self.session_ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
    }

    pub fn sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}
