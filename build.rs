//! Build script for keyscribe
//!
//! Renders man pages from the clap definitions in `src/cli.rs`: one for
//! `keyscribe` and one per subcommand (`keyscribe-parse.1`, ...).

use clap::{Command, CommandFactory};
use clap_mangen::Man;
use std::env;
use std::fs::{self, File};
use std::io::Error;
use std::path::{Path, PathBuf};

include!("src/cli.rs");

const BIN_NAME: &str = "keyscribe";

fn main() -> Result<(), Error> {
    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-env-changed=KEYSCRIBE_GEN_MANPAGES");

    // Debug builds skip this unless asked
    let release = env::var("PROFILE").is_ok_and(|profile| profile == "release");
    if !release && env::var_os("KEYSCRIBE_GEN_MANPAGES").is_none() {
        return Ok(());
    }

    let out_dir = env::var_os("OUT_DIR").map_or_else(|| PathBuf::from("target"), PathBuf::from);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let cli = Cli::command().name(BIN_NAME);
    write_page(&cli, &man_dir.join(format!("{BIN_NAME}.1")))?;

    for sub in cli.get_subcommands().filter(|sub| sub.get_name() != "help") {
        let page = man_dir.join(format!("{BIN_NAME}-{}.1", sub.get_name()));
        write_page(sub, &page)?;
    }

    println!("cargo:warning=Man pages generated in: {}", man_dir.display());

    Ok(())
}

fn write_page(cmd: &Command, path: &Path) -> Result<(), Error> {
    let mut file = File::create(path)?;
    Man::new(cmd.clone()).render(&mut file)
}
