mod app;
mod render;

use anyhow::{Context, Result};
use app::{App, Outgoing};
use clap::{Parser, ValueEnum};
use doudizhu_client::{ApiClient, SocketClient};
use doudizhu_core::{SeatAssignments, SeatKind};
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Human,
    Ai,
}

impl From<KindArg> for SeatKind {
    fn from(kind: KindArg) -> SeatKind {
        match kind {
            KindArg::Human => SeatKind::Human,
            KindArg::Ai => SeatKind::Ai,
        }
    }
}

/// Terminal seat for the Dou Dizhu game server.
#[derive(Debug, Parser)]
#[command(name = "doudizhu", version)]
struct Args {
    /// Base HTTP url of the game server.
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server: String,
    /// WebSocket url of the event channel; derived from --server if omitted.
    #[arg(long)]
    socket: Option<String>,
    #[arg(long, value_enum, default_value_t = KindArg::Human)]
    landlord: KindArg,
    #[arg(long, value_enum, default_value_t = KindArg::Ai)]
    farmer_a: KindArg,
    #[arg(long, value_enum, default_value_t = KindArg::Ai)]
    farmer_b: KindArg,
}

fn socket_url(args: &Args) -> String {
    match &args.socket {
        Some(url) => url.clone(),
        None => {
            let base = args.server.trim_end_matches('/');
            let base = base
                .replacen("https://", "wss://", 1)
                .replacen("http://", "ws://", 1);
            format!("{base}/ws")
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let assignments = SeatAssignments::new(
        args.landlord.into(),
        args.farmer_a.into(),
        args.farmer_b.into(),
    );

    let api = ApiClient::new(args.server.clone());
    let socket = SocketClient::connect(&socket_url(&args))
        .await
        .with_context(|| format!("connecting to {}", socket_url(&args)))?;
    let (mut sink, mut events) = socket.split();

    let mut app = App::new(assignments);
    println!("connected to {}, type `help` for commands", args.server);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            event = events.next_event() => {
                match event {
                    Ok(Some(event)) => app.handle_event(event),
                    Ok(None) => {
                        println!("server closed the connection");
                        break;
                    }
                    Err(error) => {
                        // A malformed frame poisons only that event; a
                        // transport-level error ends the session.
                        if matches!(error, doudizhu_client::TransportError::Protocol(_)) {
                            warn!(%error, "dropping malformed frame");
                        } else {
                            error!(%error, "event channel failed");
                            break;
                        }
                    }
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                match app.handle_command(line.trim()) {
                    Outgoing::Nothing => {}
                    Outgoing::Start(request) => {
                        if let Err(error) = api.start_match(&request).await {
                            app.start_failed(error.to_string());
                        }
                    }
                    Outgoing::Action(request) => {
                        if let Err(error) = sink.send(&request).await {
                            error!(%error, "failed to send action");
                            break;
                        }
                    }
                    Outgoing::Resync => {
                        match api.fetch_state().await {
                            Ok(snapshot) => app.adopt_snapshot(snapshot),
                            Err(error) => println!("resync failed: {error}"),
                        }
                    }
                    Outgoing::Quit => break,
                }
            }
            _ = ticker.tick() => {
                app.tick(Instant::now());
            }
        }
    }

    if let Err(error) = sink.close().await {
        warn!(%error, "closing socket");
    }
    Ok(())
}
