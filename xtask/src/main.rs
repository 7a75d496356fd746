//! Build automation tasks for Kitchen Knight
//!
//! Usage:
//!   cargo xtask package               # Release build + assets in dist/<platform>/
//!   cargo xtask check-maps            # Validate every assets/maps/*.txt

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Characters the map loader understands
const MAP_CHARS: &[char] = &['.', '#', 'S', 'T', 'B', 'M', 'H'];

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for Kitchen Knight")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a native release and copy it with the assets into dist/
    Package {
        /// Target platform name for the dist folder: windows, macos, linux
        #[arg(long)]
        platform: Option<String>,
    },
    /// Check map files for a single start cell and known characters
    CheckMaps {
        /// Directory to scan (defaults to assets/maps)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Package { platform } => package(platform),
        Commands::CheckMaps { dir } => check_maps(dir),
    }
}

/// Get the project root directory
fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        anyhow::bail!("Command failed with status: {}", status);
    }
    Ok(())
}

/// Copy directory recursively
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

fn host_platform() -> String {
    if cfg!(target_os = "windows") {
        "windows".to_string()
    } else if cfg!(target_os = "macos") {
        "macos".to_string()
    } else {
        "linux".to_string()
    }
}

/// Native release build with assets alongside
fn package(platform: Option<String>) -> Result<()> {
    let root = project_root()?;
    let platform = platform.unwrap_or_else(host_platform);
    let dist = root.join(format!("dist/{}", platform));

    // Refuse to ship broken maps
    check_maps(None)?;

    println!("Building native release for {}...", platform);

    if dist.exists() {
        std::fs::remove_dir_all(&dist)?;
    }
    std::fs::create_dir_all(&dist)?;

    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release"]),
    )?;

    let binary_name = if platform == "windows" {
        "kitchen-knight.exe"
    } else {
        "kitchen-knight"
    };

    std::fs::copy(
        root.join(format!("target/release/{}", binary_name)),
        dist.join(binary_name),
    )
    .with_context(|| format!("copying {}", binary_name))?;

    let assets = root.join("assets");
    if assets.exists() {
        copy_dir_recursive(&assets, &dist.join("assets"))?;
    }

    println!("Package ready: dist/{}/", platform);
    Ok(())
}

/// Problems found in one map. Errors fail the check; warnings are printed.
#[derive(Debug, Default, PartialEq)]
struct MapReport {
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn check_map_text(text: &str) -> MapReport {
    let mut report = MapReport::default();
    let rows: Vec<Vec<char>> = text
        .lines()
        .map(|line| line.chars().filter(|c| *c != '\r').collect())
        .collect();

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        report.errors.push("map is empty".to_string());
        return report;
    }

    let mut starts = 0;
    for (z, row) in rows.iter().enumerate() {
        if row.len() != width {
            report
                .warnings
                .push(format!("row {} is {} wide (expected {}), padded with floor", z + 1, row.len(), width));
        }
        for (x, c) in row.iter().enumerate() {
            if *c == 'S' {
                starts += 1;
            }
            if !MAP_CHARS.contains(c) {
                report
                    .errors
                    .push(format!("unknown character {:?} at row {}, column {}", c, z + 1, x + 1));
            }
        }
    }

    match starts {
        1 => {}
        0 => report.errors.push("no player start (S)".to_string()),
        n => report.errors.push(format!("{} player starts (S), expected 1", n)),
    }
    report
}

fn check_maps(dir: Option<PathBuf>) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => project_root()?.join("assets/maps"),
    };

    let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
        .with_context(|| format!("reading {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();

    let mut failed = 0;
    for path in &paths {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let report = check_map_text(&text);
        for w in &report.warnings {
            println!("warning: {}: {}", path.display(), w);
        }
        for e in &report.errors {
            println!("error: {}: {}", path.display(), e);
        }
        if report.errors.is_empty() {
            println!("ok: {}", path.display());
        } else {
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} maps failed validation", failed, paths.len());
    }
    println!("{} maps checked", paths.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_map() {
        let report = check_map_text("####\n#ST#\n#HB#\n####\n");
        assert_eq!(report, MapReport::default());
    }

    #[test]
    fn test_start_count() {
        assert!(check_map_text("...\n").errors[0].contains("no player start"));
        assert!(check_map_text("S.S\n").errors[0].contains("2 player starts"));
    }

    #[test]
    fn test_unknown_character() {
        let report = check_map_text("S.x\n");
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("column 3"));
    }

    #[test]
    fn test_ragged_rows_warn() {
        let report = check_map_text("S..\n#\n");
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_empty() {
        assert_eq!(check_map_text("").errors, vec!["map is empty".to_string()]);
    }
}
