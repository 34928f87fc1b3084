//! Renders the `r(1)` manual page from the CLI definition.
//!
//! The page lands in `OUT_DIR/r.1`. The long-help epilogue on [`Cli`]
//! becomes its extra section, documenting `r.toml`, the `R_*` variables and
//! exit statuses alongside the options.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::CommandFactory;
use clap_mangen::Man;

#[path = "src/cli/mod.rs"]
mod cli;

use cli::Cli;

const MAN_PAGE: &str = "r.1";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = io::stdout();
    writeln!(stdout, "cargo:rerun-if-changed=build.rs")?;
    writeln!(stdout, "cargo:rerun-if-changed=src/cli/mod.rs")?;

    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR was not set"))?;
    let version = env::var("CARGO_PKG_VERSION")?;

    let man = Man::new(Cli::command())
        .section("1")
        .manual("User Commands")
        .source(format!("r {version}"));
    let mut page = Vec::new();
    man.render(&mut page)?;

    fs::write(out_dir.join(MAN_PAGE), page)?;
    Ok(())
}
