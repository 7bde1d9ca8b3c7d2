use crate::document::PresetName;
use crate::events::AppEvent;
use async_channel::Sender;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

pub const SOCKET_PATH: &str = "/tmp/rosette.sock";

/// Parses one control line from the socket. Unknown lines are ignored.
fn parse_command(line: &str) -> Option<AppEvent> {
    let line = line.trim();
    if let Some(name) = line.strip_prefix("preset ") {
        let name = name.trim();
        return (!name.is_empty()).then(|| AppEvent::SelectPreset(PresetName::new(name)));
    }
    match line {
        "show" => Some(AppEvent::Show),
        "hide" => Some(AppEvent::Hide),
        "toggle" => Some(AppEvent::Toggle),
        "editor" => Some(AppEvent::OpenEditor),
        "install" => Some(AppEvent::InstallHold),
        "uninstall" => Some(AppEvent::UninstallHold),
        "reload" => Some(AppEvent::DocumentReload),
        _ => None,
    }
}

pub async fn run_server(tx: Sender<AppEvent>) {
    // Cleanup old socket if it exists
    if std::fs::metadata(SOCKET_PATH).is_ok() {
        let _ = std::fs::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        if let Some(event) = parse_command(&line) {
                            if tx.send(event).await.is_err() {
                                break;
                            }
                        } else {
                            log::warn!("ignoring unknown control command: {line:?}");
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_plain_commands() {
        assert!(matches!(parse_command("show"), Some(AppEvent::Show)));
        assert!(matches!(parse_command(" toggle \n"), Some(AppEvent::Toggle)));
        assert!(matches!(parse_command("editor"), Some(AppEvent::OpenEditor)));
        assert!(matches!(
            parse_command("reload"),
            Some(AppEvent::DocumentReload)
        ));
    }

    #[test]
    fn gesture_lifecycle_commands_round_trip() {
        assert!(matches!(
            parse_command("install"),
            Some(AppEvent::InstallHold)
        ));
        assert!(matches!(
            parse_command("uninstall"),
            Some(AppEvent::UninstallHold)
        ));
    }

    #[test]
    fn preset_command_carries_the_name() {
        match parse_command("preset Sculpting Tools") {
            Some(AppEvent::SelectPreset(name)) => {
                assert_eq!(name, PresetName::new("Sculpting Tools"));
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_command("").is_none());
        assert!(parse_command("preset ").is_none());
        assert!(parse_command("summon").is_none());
    }
}
