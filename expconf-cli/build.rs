//! Build script for expconf-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("expconf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve layered experiment configuration files")
        .long_about(
            "Load YAML, JSON and TOML experiment configurations, follow their \
             __inherit__ declarations, merge them and substitute ${name} variables",
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .visible_alias("cfg")
                .help("Configuration file to load (repeatable; later files take precedence)")
                .value_name("FILE")
                .global(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("max-merge-depth")
                .long("max-merge-depth")
                .help("Mapping depth after which nested values are no longer merged")
                .value_name("DEPTH")
                .global(true)
                .env("EXPCONF_MAX_MERGE_DEPTH"),
        )
        .arg(
            Arg::new("strict-depth")
                .long("strict-depth")
                .help("Fail instead of warning when the merge depth limit is reached")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("keep-variables")
                .long("keep-variables")
                .help("Keep the __variables__ block in the resolved configuration")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("dump")
                .about("Print the resolved configuration")
                .long_about("Print the resolved configuration as YAML, JSON or TOML"),
            Command::new("order")
                .about("Print the order in which files are merged")
                .long_about("Print every file taking part in the merge, ancestors first"),
            Command::new("get")
                .about("Print a single value by dotted key path")
                .long_about("Print one value of the resolved configuration; exits 1 when missing"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("expconf.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
