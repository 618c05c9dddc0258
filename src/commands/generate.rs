//! Generate the static JSON export

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebouncedEvent};
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::generator::Generator;
use crate::Folio;

/// Index posts from scratch and write the export
pub fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    let blog = folio.load_blog()?;
    Generator::new(folio).generate(&blog)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Watch the posts directory and config, regenerating on every change.
///
/// Changes are coalesced by the debouncer; every delivered batch triggers a
/// rebuild, including batches that queued up while a rebuild was running.
pub async fn watch(folio: &Folio) -> Result<()> {
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    std::fs::create_dir_all(&folio.posts_dir)?;
    debouncer
        .watcher()
        .watch(&folio.posts_dir, RecursiveMode::Recursive)?;

    let config_path = folio.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching {:?} for changes. Press Ctrl+C to stop.", folio.posts_dir);

    let mut folio = folio.clone();

    tokio::task::block_in_place(move || {
        loop {
            match rx.recv() {
                Ok(Ok(events)) => {
                    if let Err(e) = rebuild(&mut folio, &events) {
                        tracing::error!("Generation failed: {}", e);
                    }
                }
                Ok(Err(e)) => {
                    tracing::error!("Watch error: {:?}", e);
                }
                Err(e) => {
                    tracing::error!("Channel error: {:?}", e);
                    break;
                }
            }
        }
    });

    Ok(())
}

/// Regenerate for one debounced batch, re-reading `_config.yml` first when
/// it is among the changed paths. Returns whether a rebuild ran.
fn rebuild(folio: &mut Folio, events: &[DebouncedEvent]) -> Result<bool> {
    let changed: Vec<&Path> = events
        .iter()
        .map(|e| e.path.as_path())
        .filter(|p| is_relevant(p))
        .collect();
    if changed.is_empty() {
        return Ok(false);
    }
    tracing::info!("Changed: {:?}, regenerating...", changed);

    if changed.iter().any(|p| p.ends_with("_config.yml")) {
        match Folio::new(&folio.base_dir) {
            Ok(reloaded) => *folio = reloaded,
            Err(e) => tracing::error!("Keeping previous config: {}", e),
        }
    }

    run(folio)?;
    Ok(true)
}

/// Editor swap files and Finder metadata never affect the export
fn is_relevant(path: &Path) -> bool {
    let path = path.to_string_lossy();
    !path.contains(".DS_Store") && !path.ends_with('~')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_generates_export() {
        let dir = TempDir::new().unwrap();
        crate::commands::init::init_site(dir.path()).unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        folio.generate().unwrap();

        assert!(folio.public_dir.join("posts.json").exists());
        assert!(folio.public_dir.join("posts/hello-world.json").exists());
        let tags = fs::read_to_string(folio.public_dir.join("tags.json")).unwrap();
        assert!(tags.contains("meta"));
    }

    fn changed(path: std::path::PathBuf) -> DebouncedEvent {
        DebouncedEvent {
            path,
            kind: notify_debouncer_mini::DebouncedEventKind::Any,
        }
    }

    #[test]
    fn test_rebuild_every_batch() {
        let dir = TempDir::new().unwrap();
        crate::commands::init::init_site(dir.path()).unwrap();
        let mut folio = Folio::new(dir.path()).unwrap();
        folio.generate().unwrap();

        // back-to-back batches each produce a rebuild
        for name in ["first", "second"] {
            let path = folio.posts_dir.join(format!("{}.md", name));
            fs::write(&path, format!("---\ntitle: {}\n---\nBody.", name)).unwrap();
            assert!(rebuild(&mut folio, &[changed(path)]).unwrap());
            assert!(folio.public_dir.join(format!("posts/{}.json", name)).exists());
        }
    }

    #[test]
    fn test_rebuild_ignores_noise() {
        let dir = TempDir::new().unwrap();
        let mut folio = Folio::new(dir.path()).unwrap();
        let events = [
            changed(folio.posts_dir.join(".DS_Store")),
            changed(folio.posts_dir.join("post.md~")),
        ];
        assert!(!rebuild(&mut folio, &events).unwrap());
        assert!(!folio.public_dir.join("posts.json").exists());
    }

    #[test]
    fn test_rebuild_reloads_config() {
        let dir = TempDir::new().unwrap();
        crate::commands::init::init_site(dir.path()).unwrap();
        let mut folio = Folio::new(dir.path()).unwrap();

        let config_path = dir.path().join("_config.yml");
        fs::write(&config_path, "title: Renamed\npublic_dir: out\n").unwrap();
        assert!(rebuild(&mut folio, &[changed(config_path)]).unwrap());

        assert_eq!(folio.config.title, "Renamed");
        assert!(dir.path().join("out/posts.json").exists());
    }
}
