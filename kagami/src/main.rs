use std::path::PathBuf;

use anyhow::Result;
use argh::FromArgs;
use tracing_subscriber::EnvFilter;

use kagami::{socket, Wm, WmState};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Kagami - live bspwm state mirror
#[derive(FromArgs)]
struct Cli {
    #[argh(subcommand)]
    command: SubCommand,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum SubCommand {
    Watch(WatchCmd),
    State(StateCmd),
    Version(VersionCmd),
}

/// Follow bspwm events, printing each one with the mirrored focus context
#[derive(FromArgs)]
#[argh(subcommand, name = "watch")]
struct WatchCmd {
    /// socket path (defaults to $BSPWM_SOCKET, then $DISPLAY discovery)
    #[argh(option)]
    socket: Option<PathBuf>,
}

/// Print the monitor/desktop tree once
#[derive(FromArgs)]
#[argh(subcommand, name = "state")]
struct StateCmd {
    /// socket path (defaults to $BSPWM_SOCKET, then $DISPLAY discovery)
    #[argh(option)]
    socket: Option<PathBuf>,
}

/// Show version information
#[derive(FromArgs)]
#[argh(subcommand, name = "version")]
struct VersionCmd {}

#[tokio::main]
async fn main() -> Result<()> {
    let cli: Cli = argh::from_env();

    match cli.command {
        SubCommand::Watch(cmd) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .init();
            run_watch(cmd).await
        }
        SubCommand::State(cmd) => run_state(cmd).await,
        SubCommand::Version(_) => {
            println!("kagami {}", VERSION);
            Ok(())
        }
    }
}

fn resolve_socket(socket: Option<PathBuf>) -> Result<PathBuf> {
    match socket {
        Some(path) => Ok(path),
        None => Ok(socket::find_socket()?),
    }
}

async fn run_watch(cmd: WatchCmd) -> Result<()> {
    let path = resolve_socket(cmd.socket)?;
    let mut wm = Wm::new(&path).on_event(|line, state| {
        let focused = state
            .focused()
            .and_then(|m| m.focused().map(|d| format!("{}/{}", m.name, d.name)))
            .unwrap_or_default();
        println!("{}  [{}]", line, focused);
    });

    wm.bootstrap().await?;
    wm.run().await?;
    Ok(())
}

async fn run_state(cmd: StateCmd) -> Result<()> {
    let path = resolve_socket(cmd.socket)?;
    let mut wm = Wm::new(&path);
    wm.bootstrap().await?;

    let state = wm.state().expect("bootstrap populates the mirror");
    print_tree(state);
    Ok(())
}

fn print_tree(state: &WmState) {
    let mut monitors: Vec<_> = state.monitors.values().collect();
    monitors.sort_by_key(|m| m.id);

    for monitor in monitors {
        let marker = if monitor.id == state.focused_monitor {
            " *"
        } else {
            ""
        };
        println!("{}{}", monitor.name, marker);

        let mut desktops: Vec<_> = monitor.desktops.values().collect();
        desktops.sort_by_key(|d| d.id);
        for desktop in desktops {
            let marker = if desktop.id == monitor.focused_desktop {
                " *"
            } else {
                ""
            };
            println!("  {} [{}]{}", desktop.name, desktop.layout, marker);
        }
    }
}
