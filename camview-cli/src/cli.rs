use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "camview-cli",
    version,
    about = "Control panel for a network camera's HTTP API"
)]
pub struct Cli {
    /// Device base URL, e.g. http://192.168.4.1
    #[arg(short, long, env = "CAMVIEW_URL")]
    pub url: String,

    /// Basic auth user name.
    #[arg(long, env = "CAMVIEW_USER", requires = "password")]
    pub user: Option<String>,

    /// Basic auth password.
    #[arg(long, env = "CAMVIEW_PASSWORD", hide_env_values = true, requires = "user")]
    pub password: Option<String>,

    /// Request timeout in milliseconds.
    #[arg(long, default_value_t = camview::constants::DEFAULT_REQUEST_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Print raw JSON instead of tables.
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show device status once.
    Status,
    /// Refresh device status until interrupted.
    Watch(WatchArgs),
    /// Manage recordings on the SD card.
    Sd {
        #[command(subcommand)]
        command: SdCommand,
    },
    /// Scan for and join Wi-Fi networks.
    Wifi {
        #[command(subcommand)]
        command: WifiCommand,
    },
    /// Set one configuration key. The value is parsed as JSON when possible.
    Config { key: String, value: String },
    /// Start or stop recording.
    Record,
    /// Restart the device.
    Reboot,
    /// Erase settings and restart the device.
    FactoryReset {
        /// Required confirmation.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Poll interval in milliseconds.
    #[arg(long, default_value_t = camview::constants::DEFAULT_POLL_INTERVAL_MS)]
    pub interval_ms: u64,
}

#[derive(Debug, Subcommand)]
pub enum SdCommand {
    /// List recordings with size and download link.
    List,
    /// Delete one recording.
    Delete { file: String },
}

#[derive(Debug, Subcommand)]
pub enum WifiCommand {
    /// Scan for nearby networks.
    Scan,
    /// Show the current connection.
    Status,
    /// Join a network; the device restarts on success.
    Connect { ssid: String, password: String },
}
