use anyhow::Result;
use clap::Parser;
use colored::*;
use std::sync::Arc;
use tincan_client::{ClientEvent, SilentAudioSource, TransportConfig, VoiceClient};
use tincan_core::{IceServerConfig, RoomDescriptor};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tincan")]
#[command(about = "Join a voice room and hold a peer-to-peer audio call")]
struct Args {
    /// Signaling endpoint, e.g. ws://localhost:8080/ws
    #[arg(long, default_value = "ws://localhost:8080/ws")]
    server: String,

    /// Room to join.
    #[arg(long)]
    room: String,

    /// STUN/TURN url, repeatable.
    #[arg(long = "ice")]
    ice_servers: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let transport_config = if args.ice_servers.is_empty() {
        TransportConfig::default()
    } else {
        TransportConfig {
            ice_servers: vec![IceServerConfig {
                urls: args.ice_servers.clone(),
                username: None,
                credential: None,
            }],
        }
    };

    println!("{}", format!("📡 Connecting to {}...", args.server).cyan());
    let (handle, mut events) =
        VoiceClient::connect(&args.server, transport_config, Arc::new(SilentAudioSource)).await?;

    // The room directory normally supplies descriptors; joining by bare id
    // is enough for the relay.
    let room = RoomDescriptor {
        id: args.room.clone().into(),
        display_name: args.room.clone(),
        creator_id: String::new(),
    };
    handle.join(room).await?;
    println!("{}", format!("🔊 Joining '{}'...", args.room).green());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                handle.leave().await?;
                println!("{}", "👋 Left the room.".yellow());
                break;
            }

            event = events.recv() => {
                let Some(event) = event else { break };
                match &event {
                    ClientEvent::RosterUpdated { participants } => {
                        println!("{}", format!("👥 In the room: {}", participants.len()).cyan());
                        for participant in participants {
                            println!("   - {participant}");
                        }
                    }
                    ClientEvent::RemoteTrack(_) => {
                        println!("{}", "🎧 Remote audio connected.".green().bold());
                    }
                    ClientEvent::CallFailed(err) => {
                        eprintln!("{}", format!("✗ Call failed: {err}").red());
                    }
                    ClientEvent::ServerError(message) => {
                        eprintln!("{}", format!("✗ Server: {message}").red());
                    }
                    ClientEvent::CallEnded => {
                        println!("{}", "📴 Call ended.".yellow());
                    }
                    ClientEvent::ChannelClosed(reason) => {
                        eprintln!("{}", format!("✗ Connection lost: {reason:?}").red());
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}
