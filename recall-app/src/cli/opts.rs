use clap::Parser;

#[derive(Debug, Parser, Clone)]
#[command(name = "recall", version, about = "Spaced-repetition review scheduler API")]
pub struct Cli {
    /// Bind address (host:port)
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub addr: String,

    /// Study queue size when the client does not pass a limit
    #[arg(long, default_value_t = 20)]
    pub queue_limit: usize,

    /// How long a review waits on a contended card before returning Busy
    #[arg(long, default_value_t = 250)]
    pub lock_wait_ms: u64,
}
