mod error;
mod headless;
mod script;
mod session;

use std::time::Duration;

use clap::{Parser, Subcommand};
use place::config::PlaceConfig;
use place::geometry::{Coordinate, Size};
use place::input::MoveKey;
use tracing_subscriber::EnvFilter;

use crate::error::ClientError;
use crate::script::Script;
use crate::session::SessionOptions;

#[derive(Parser, Debug)]
#[command(name = "drawplace", about = "Headless client for a shared drawing place")]
struct Cli {
    #[arg(long, env = "DRAWPLACE_URL", default_value = "ws://127.0.0.1:5000/ws")]
    url: String,

    /// Viewport width in world units.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Viewport height in world units.
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Initial location, x.
    #[arg(long, allow_negative_numbers = true)]
    x: Option<f64>,

    /// Initial location, y.
    #[arg(long, allow_negative_numbers = true)]
    y: Option<f64>,

    #[arg(long, env = "DRAWPLACE_NAME")]
    name: Option<String>,

    /// Stroke color, any CSS color string.
    #[arg(long, env = "DRAWPLACE_COLOR")]
    color: Option<String>,

    /// Frame tick cadence in milliseconds.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Drop chat lines and strokes the authority echoes back to us.
    #[arg(long, default_value_t = false)]
    dedupe_echo: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stay connected and log chat, presence, and chunk traffic.
    Watch,
    /// Send one chat message.
    Say { body: String },
    /// Draw one segment between two viewport-local points.
    #[command(allow_negative_numbers = true)]
    Stroke { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// Hold a movement key for a number of frames.
    Walk {
        #[arg(long)]
        key: String,
        #[arg(long, default_value_t = 60)]
        frames: u32,
    },
}

impl Cli {
    fn options(&self) -> SessionOptions {
        let initial_location = match (self.x, self.y) {
            (None, None) => None,
            (x, y) => Some(Coordinate::new(x.unwrap_or_default(), y.unwrap_or_default())),
        };
        SessionOptions {
            url: self.url.clone(),
            size: Size::new(self.width, self.height),
            initial_location,
            name: self.name.clone(),
            color: self.color.clone(),
            frame_interval: Duration::from_millis(self.frame_ms.max(1)),
            config: PlaceConfig {
                dedupe_message_echo: self.dedupe_echo,
                dedupe_line_echo: self.dedupe_echo,
                ..PlaceConfig::default()
            },
        }
    }
}

impl Command {
    fn script(&self) -> Result<Script, ClientError> {
        Ok(match self {
            Self::Watch => Script::Watch,
            Self::Say { body } => Script::Say { body: body.clone() },
            Self::Stroke { x1, y1, x2, y2 } => Script::Stroke {
                from: Coordinate::new(*x1, *y1),
                to: Coordinate::new(*x2, *y2),
            },
            Self::Walk { key, frames } => Script::Walk {
                key: MoveKey::from_key(key).ok_or_else(|| ClientError::InvalidKey(key.clone()))?,
                frames: *frames,
            },
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ClientError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let script = cli.command.script()?;
    session::run(cli.options(), script).await
}
