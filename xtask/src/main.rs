//! Development tasks for keyscribe
//!
//! Usage:
//!   cargo xtask install     Install release binary and man pages (requires sudo)
//!   cargo xtask uninstall   Remove binary and man pages (requires sudo)
//!   cargo xtask dist        Build release binary and man pages for distribution

use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

const BIN_DIR: &str = "/usr/local/bin";
const MAN_DIR: &str = "/usr/local/share/man/man1";

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let Some(task) = args.first() else {
        print_help();
        return ExitCode::SUCCESS;
    };

    let result = match task.as_str() {
        "install" => install(),
        "uninstall" => uninstall(),
        "dist" => dist().map(|_| ()),
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_help();
            Err(anyhow::anyhow!("Unknown command"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    eprintln!(
        r#"
keyscribe development tasks

Usage: cargo xtask <COMMAND>

Commands:
  install    Build release binary, install it and its man pages (requires sudo)
  uninstall  Remove keyscribe and its man pages (requires sudo)
  dist       Build optimized release binary and man pages
"#
    );
}

/// Get the project root directory
fn project_root() -> anyhow::Result<PathBuf> {
    let dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir()?,
    };

    // xtask is in a subdirectory, go up one level
    Ok(dir.parent().unwrap_or(&dir).to_path_buf())
}

/// Build the release binary with man pages, returning the binary path
fn dist() -> anyhow::Result<PathBuf> {
    let root = project_root()?;

    println!("==> Building release binary...");
    let status = Command::new("cargo")
        .args(["build", "--release"])
        .env("KEYSCRIBE_GEN_MANPAGES", "1")
        .current_dir(&root)
        .status()?;

    if !status.success() {
        anyhow::bail!("Build failed");
    }

    let binary = root.join("target/release/keyscribe");
    if !binary.exists() {
        anyhow::bail!("Binary not found at {:?}", binary);
    }

    println!("==> Built: {:?}", binary);
    for page in man_pages(&root)? {
        println!("    man: {:?}", page);
    }

    Ok(binary)
}

/// Man pages left by build.rs under target/release/build/keyscribe-*/out/man
fn man_pages(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let build_dir = root.join("target/release/build");
    let mut pages = Vec::new();

    if !build_dir.exists() {
        return Ok(pages);
    }

    for entry in std::fs::read_dir(&build_dir)? {
        let man_dir = entry?.path().join("out/man");
        if !man_dir.is_dir() {
            continue;
        }
        for page in std::fs::read_dir(&man_dir)? {
            let page = page?.path();
            if page.extension().is_some_and(|ext| ext == "1") {
                pages.push(page);
            }
        }
    }

    pages.sort();
    pages.dedup_by(|a, b| a.file_name() == b.file_name());
    Ok(pages)
}

/// Build and install to /usr/local
fn install() -> anyhow::Result<()> {
    let binary = dist()?;
    let root = project_root()?;

    println!("==> Installing to {}/keyscribe...", BIN_DIR);
    sudo_install("-Dm755", &binary, &Path::new(BIN_DIR).join("keyscribe"))?;

    for page in man_pages(&root)? {
        if let Some(name) = page.file_name() {
            sudo_install("-Dm644", &page, &Path::new(MAN_DIR).join(name))?;
        }
    }

    println!("==> Installed successfully!");

    // Show version
    let _ = Command::new(Path::new(BIN_DIR).join("keyscribe"))
        .arg("--version")
        .status();

    Ok(())
}

fn sudo_install(mode: &str, from: &Path, to: &Path) -> anyhow::Result<()> {
    let status = Command::new("sudo")
        .arg("install")
        .arg(mode)
        .arg(from)
        .arg(to)
        .status()?;

    if !status.success() {
        anyhow::bail!("Install of {:?} failed (sudo required)", to);
    }
    Ok(())
}

/// Remove keyscribe from /usr/local
fn uninstall() -> anyhow::Result<()> {
    println!("==> Removing {}/keyscribe and man pages...", BIN_DIR);

    let status = Command::new("sudo")
        .args(["sh", "-c"])
        .arg(format!(
            "rm -f {}/keyscribe {}/keyscribe.1 {}/keyscribe-*.1",
            BIN_DIR, MAN_DIR, MAN_DIR
        ))
        .status()?;

    if !status.success() {
        anyhow::bail!("Uninstall failed (sudo required)");
    }

    println!("==> Uninstalled successfully!");
    Ok(())
}
