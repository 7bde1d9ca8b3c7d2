use crate::document::MenuDocument;
use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use fs_err as fs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Shipped first-run document, written to disk the first time the daemon
/// starts.
pub const DEFAULT_DOCUMENT: &str = include_str!("default_document.json");

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("malformed menu document: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn document_path() -> Result<PathBuf, StoreError> {
    let proj_dirs =
        ProjectDirs::from("org", "atelier", "rosette").ok_or(StoreError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("menu.json"))
}

pub fn load_from(path: &Path) -> Result<MenuDocument, StoreError> {
    if !path.exists() {
        let mut document: MenuDocument = serde_json::from_str(DEFAULT_DOCUMENT)?;
        document.normalize();
        save_to(path, &document)?;
        return Ok(document);
    }

    let raw = fs::read_to_string(path)?;
    let mut document: MenuDocument = serde_json::from_str(&raw)?;
    if document.normalize() {
        // Backfill repaired something; write back so the on-disk file
        // converges to the current schema.
        save_to(path, &document)?;
    }
    Ok(document)
}

/// Pretty JSON in map-insertion order, so diffs stay readable.
pub fn save_to(path: &Path, document: &MenuDocument) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut out = serde_json::to_string_pretty(document)?;
    out.push('\n');
    fs::write(path, out)?;
    Ok(())
}

pub fn load() -> Result<MenuDocument, StoreError> {
    load_from(&document_path()?)
}

pub fn save(document: &MenuDocument) -> Result<(), StoreError> {
    save_to(&document_path()?, document)
}

pub fn load_or_default() -> MenuDocument {
    match load() {
        Ok(document) => document,
        Err(e) => {
            log::error!("falling back to the built-in menu document: {e}");
            let mut document: MenuDocument =
                serde_json::from_str(DEFAULT_DOCUMENT).unwrap_or_default();
            document.normalize();
            document
        }
    }
}

/// Watches the document for external edits and asks the GTK thread to
/// reload. Runs on the background tokio runtime.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let document_path = match document_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("document watcher error: {e}");
            return;
        }
    };
    let document_dir = match document_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs::create_dir_all(&document_dir) {
        log::error!("failed to create config directory for watching: {e}");
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("failed to create watcher: {e}");
            return;
        }
    };

    if let Err(e) = watcher.watch(&document_dir, RecursiveMode::NonRecursive) {
        log::error!("failed to watch config directory: {e}");
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &document_path)
                    && tx.send(AppEvent::DocumentReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("watch error: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{PresetName, SectorLabel};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rosette-{}-{name}", std::process::id()))
    }

    #[test]
    fn builtin_document_is_canonical() {
        let mut document: MenuDocument = serde_json::from_str(DEFAULT_DOCUMENT).unwrap();
        // The shipped asset should need no backfill.
        assert!(!document.normalize());
        assert_eq!(document.active_preset, PresetName::new("Default"));
        let preset = document.active().unwrap();
        assert!(!preset.inner_section.is_empty());
        let files = preset.sector(&SectorLabel::new("Files")).unwrap();
        assert_eq!(files.children.len(), 3);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = temp_path("round-trip");
        let path = dir.join("menu.json");
        let mut document: MenuDocument = serde_json::from_str(DEFAULT_DOCUMENT).unwrap();
        document.active_mut().unwrap().add_sector();

        save_to(&path, &document).unwrap();
        let reloaded = load_from(&path).unwrap();
        assert_eq!(reloaded, document);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_materializes_the_default_document() {
        let dir = temp_path("first-run");
        let path = dir.join("menu.json");

        let document = load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(document.active_preset, PresetName::new("Default"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn repaired_documents_are_written_back() {
        let dir = temp_path("repair");
        let path = dir.join("menu.json");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            &path,
            r#"{ "active_preset": "Gone", "presets": { "Only": {} } }"#,
        )
        .unwrap();

        let document = load_from(&path).unwrap();
        assert_eq!(document.active_preset, PresetName::new("Only"));

        // Second load sees the converged file and repairs nothing.
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"active_preset\": \"Only\""));

        let _ = fs::remove_dir_all(&dir);
    }
}
