#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::sync::Arc;

#[cfg(feature = "std")]
use broadside::{
    cli::run_play, init_logging, serve, FleetPolicy, GameConfig, GameService, RegistryConfig,
};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use tokio::net::TcpListener;
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the computer in this terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = broadside::BOARD_SIZE, help = "Side of the square grid")]
        size: usize,
        #[arg(long, help = "Accept any ships with canonical lengths instead of the standard fleet")]
        custom_fleet: bool,
        #[arg(long, help = "Require ships to be straight lines")]
        straight: bool,
    },
    /// Serve games to remote clients over TCP.
    Serve {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
        #[arg(long, default_value_t = 1024)]
        max_sessions: usize,
        #[arg(long, default_value_t = 3600, help = "Drop games idle for this many seconds")]
        idle_secs: u64,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            seed,
            size,
            custom_fleet,
            straight,
        } => {
            let mut config = GameConfig::new()
                .with_board_size(size)
                .with_straight_ships(straight);
            if custom_fleet {
                config = config.with_fleet_policy(FleetPolicy::Custom);
            }
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
                config = config.with_seed(s);
            }
            if config.board_size != size {
                println!("Board size adjusted to {}", config.board_size);
            }
            tokio::task::spawn_blocking(move || run_play(config)).await??;
        }
        Commands::Serve {
            bind,
            max_sessions,
            idle_secs,
        } => {
            let idle_timeout = Duration::from_secs(idle_secs);
            let config = RegistryConfig {
                max_sessions: max_sessions.max(1),
                idle_timeout,
                ..RegistryConfig::default()
            };
            let service = Arc::new(GameService::new(config));

            let sweeper = service.clone();
            tokio::spawn(async move {
                let period = (idle_timeout / 4).max(Duration::from_secs(1));
                let mut ticker = tokio::time::interval(period);
                loop {
                    ticker.tick().await;
                    sweeper.registry().evict_idle(std::time::Instant::now());
                }
            });

            let listener = TcpListener::bind(&bind).await?;
            log::info!("listening on {}", listener.local_addr()?);
            serve(listener, service).await?;
        }
    }
    Ok(())
}
