use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use feedcraft::config::Config;
use feedcraft::{render_rss2_with, EncodeOptions, Feed};

/// Largest feed description accepted (64 MB).
const MAX_INPUT_SIZE: u64 = 64 * 1_048_576;

/// Get the default config file path (~/.config/feedcraft/config.toml)
fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("feedcraft")
            .join("config.toml"),
    )
}

/// Reads a feed description. `.json` files are parsed as JSON, anything else as TOML.
fn load_feed(path: &Path) -> Result<Feed> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read feed description: {}", path.display()))?;
    if !metadata.is_file() {
        anyhow::bail!("Feed description must be a regular file: {}", path.display());
    }
    if metadata.len() > MAX_INPUT_SIZE {
        anyhow::bail!(
            "Feed description is {} bytes (max {} bytes)",
            metadata.len(),
            MAX_INPUT_SIZE
        );
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read feed description: {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let feed: Feed = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON feed description: {}", path.display()))?
    } else {
        toml::from_str(&content)
            .with_context(|| format!("Invalid TOML feed description: {}", path.display()))?
    };

    tracing::info!(
        path = %path.display(),
        items = feed.items.len(),
        "Loaded feed description"
    );
    Ok(feed)
}

/// Replaces `dst` with `content` so readers see either the previous document
/// or the new one, never a partial write.
fn atomic_write(content: &[u8], dst: &Path) -> Result<()> {
    let temp_path = temp_sibling(dst);
    let result = write_synced(&temp_path, content).and_then(|()| replace(&temp_path, dst));
    if result.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }
    result
}

/// A hidden, process-unique path next to `dst`, so the final rename stays on one filesystem.
fn temp_sibling(dst: &Path) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    let name = dst
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "feed".to_string());
    dst.with_file_name(format!(".{name}.{}.{nanos:08x}.tmp", std::process::id()))
}

fn write_synced(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| format!("Failed to create temporary file '{}'", path.display()))?;
    file.write_all(content)
        .and_then(|()| file.sync_all())
        .with_context(|| format!("Failed to write temporary file '{}'", path.display()))
}

fn replace(temp_path: &Path, dst: &Path) -> Result<()> {
    #[cfg(windows)]
    if dst.exists() {
        std::fs::remove_file(dst)
            .with_context(|| format!("Failed to remove existing '{}'", dst.display()))?;
    }

    std::fs::rename(temp_path, dst).with_context(|| {
        format!(
            "Failed to move '{}' into place at '{}'",
            temp_path.display(),
            dst.display()
        )
    })
}

#[derive(Parser, Debug)]
#[command(name = "feedcraft", about = "Render a feed description as an RSS 2.0 document")]
struct Args {
    /// Feed description (.json, or TOML for any other extension)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Write the document to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Config file (default: ~/.config/feedcraft/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the document on a single line
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the document
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = match args.config.as_deref() {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => match default_config_path() {
            Some(path) => Config::load(&path).context("Failed to load config")?,
            None => Config::default(),
        },
    };

    let mut feed = load_feed(&args.input)?;
    config.apply_defaults(&mut feed.options);

    let encode_options = if args.compact {
        EncodeOptions::compact()
    } else {
        config.encode_options()
    };

    let document = render_rss2_with(&feed, &encode_options)
        .with_context(|| format!("Failed to render {}", args.input.display()))?;

    match &args.output {
        Some(output) => {
            atomic_write(document.as_bytes(), output)?;
            tracing::info!(path = %output.display(), bytes = document.len(), "Wrote RSS document");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(document.as_bytes())
                .and_then(|()| stdout.write_all(b"\n"))
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("feedcraft_main_test_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_feed_from_toml_description() {
        let dir = scratch_dir("toml");
        let path = dir.join("feed.toml");
        std::fs::write(
            &path,
            r#"
[options]
title = "Release notes"
link = "https://example.com/"
description = "What shipped"
updated = 2020-01-01T00:00:00Z

[[items]]
title = "v1.0"
link = "https://example.com/v1"
published = 2020-01-02T00:00:00Z
"#,
        )
        .unwrap();

        let feed = load_feed(&path).unwrap();
        assert_eq!(feed.options.title, "Release notes");
        assert_eq!(
            feed.options.updated,
            Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
        );
        let xml = render_rss2_with(&feed, &EncodeOptions::compact()).unwrap();
        assert!(xml.contains("<lastBuildDate>Wed, 01 Jan 2020 00:00:00 GMT</lastBuildDate>"));
        assert!(xml.contains("<pubDate>Thu, 02 Jan 2020 00:00:00 GMT</pubDate>"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_feed_from_json_description() {
        let dir = scratch_dir("json");
        let path = dir.join("feed.JSON");
        std::fs::write(
            &path,
            r#"{"options": {"title": "T", "link": "https://example.com/", "description": "D"}}"#,
        )
        .unwrap();

        let feed = load_feed(&path).unwrap();
        assert_eq!(feed.options.title, "T");
        assert!(feed.items.is_empty());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_feed_reports_invalid_description() {
        let dir = scratch_dir("invalid");
        let path = dir.join("feed.toml");
        std::fs::write(&path, "[options]\ntitle = 3\n").unwrap();

        let err = load_feed(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid TOML feed description"));

        assert!(load_feed(&dir).is_err());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_atomic_write_replaces_destination() {
        let dir = scratch_dir("atomic");
        let dst = dir.join("feed.xml");
        std::fs::write(&dst, "old").unwrap();

        atomic_write(b"new", &dst).unwrap();

        assert_eq!(std::fs::read_to_string(&dst).unwrap(), "new");
        let leftovers = std::fs::read_dir(&dir).unwrap().count();
        assert_eq!(leftovers, 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_atomic_write_into_missing_directory_fails_cleanly() {
        let dir = scratch_dir("atomic_missing");
        let dst = dir.join("nope").join("feed.xml");

        assert!(atomic_write(b"data", &dst).is_err());
        assert!(!dst.exists());

        std::fs::remove_dir_all(&dir).ok();
    }
}
