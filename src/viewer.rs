use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

/// Open the finished report with the configured viewer, or the platform opener.
pub fn open(command: Option<&str>, path: &Path) -> Result<()> {
    let mut cmd = build_command(command, path)?;
    let program = cmd.get_program().to_string_lossy().into_owned();
    tracing::debug!(?cmd, "launching viewer");
    cmd.spawn()
        .map_err(|_| anyhow::anyhow!("viewer '{}' not found or failed to launch", program))?;
    Ok(())
}

fn build_command(command: Option<&str>, path: &Path) -> Result<Command> {
    let argv = match command {
        Some(line) => shell_words::split(line)
            .with_context(|| format!("invalid viewer command: {}", line))?,
        None => platform_opener(),
    };
    let (program, args) = argv.split_first().context("viewer command is empty")?;

    let mut cmd = Command::new(program);
    cmd.args(args);
    match viewer_kind(program) {
        ViewerKind::Browser => cmd.arg(file_url(path)),
        ViewerKind::Opener => cmd.arg(path),
    };
    Ok(cmd)
}

enum ViewerKind {
    /// Wants a URL rather than a bare path.
    Browser,
    Opener,
}

fn viewer_kind(program: &str) -> ViewerKind {
    let bin = Path::new(program)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(program);

    match bin {
        "firefox" | "chromium" | "chromium-browser" | "google-chrome" | "brave" | "w3m"
        | "lynx" => ViewerKind::Browser,
        _ => ViewerKind::Opener,
    }
}

fn platform_opener() -> Vec<String> {
    let argv: &[&str] = if cfg!(target_os = "macos") {
        &["open"]
    } else if cfg!(windows) {
        &["cmd", "/C", "start", ""]
    } else {
        &["xdg-open"]
    };
    argv.iter().map(|s| s.to_string()).collect()
}

fn file_url(path: &Path) -> String {
    let abs = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", abs.to_string_lossy())
}
