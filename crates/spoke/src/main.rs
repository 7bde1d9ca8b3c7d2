use clap::{Parser, Subcommand};
use std::io::Write;
use std::os::unix::net::UnixStream;

const SOCKET_PATH: &str = "/tmp/rosette.sock";

#[derive(Parser, Debug)]
#[command(name = "spoke", version, about = "Control a running rosette daemon", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show the menu overlay
    Show,
    /// Hide the menu overlay
    Hide,
    /// Toggle the menu overlay
    Toggle,
    /// Open the preset editor
    Editor,
    /// Attach the right-button summon gesture
    Install,
    /// Detach the right-button summon gesture
    Uninstall,
    /// Reload the menu document from disk
    Reload,
    /// Switch to a named preset
    Preset { name: String },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Show => send_command("show"),
        Commands::Hide => send_command("hide"),
        Commands::Toggle => send_command("toggle"),
        Commands::Editor => send_command("editor"),
        Commands::Install => send_command("install"),
        Commands::Uninstall => send_command("uninstall"),
        Commands::Reload => send_command("reload"),
        Commands::Preset { name } => send_command(&format!("preset {name}")),
    }
}

fn send_command(cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to rosette daemon at {}: {}. Is rosette running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
