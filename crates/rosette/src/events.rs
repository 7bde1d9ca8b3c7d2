use crate::document::PresetName;

/// Control events entering the GTK thread from the socket server and the
/// document watcher.
#[derive(Debug, Clone)]
pub enum AppEvent {
    Show,
    Hide,
    Toggle,
    OpenEditor,
    InstallHold,
    UninstallHold,
    SelectPreset(PresetName),
    DocumentReload,
}
