//! Build script for package-config-cli.
//!
//! This script generates the man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    Command::new("package-config")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve package: URIs and inspect package configurations")
        .long_about(
            "Command-line tool for reading, discovering and converting package configuration files",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Use this configuration file instead of discovering one")
                .value_name("PATH")
                .global(true)
                .env("PACKAGE_CONFIG_FILE"),
        )
        .arg(
            Arg::new("min-version")
                .long("min-version")
                .help("Ignore configurations older than this format version")
                .value_name("VERSION")
                .default_value("1")
                .global(true)
                .env("PACKAGE_CONFIG_MIN_VERSION"),
        )
        .arg(
            Arg::new("no-parent-search")
                .long("no-parent-search")
                .help("Only look for a configuration in the starting directory")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("resolve")
                .about("Resolve a package: URI to a location")
                .long_about("Resolve a package: URI against the configuration of a directory"),
            Command::new("reverse")
                .about("Find the package: URI of a file")
                .long_about("Print the package: URI that resolves to the given file"),
            Command::new("find")
                .about("Show the configuration that applies to a directory")
                .long_about("Discover the nearest configuration and list its packages"),
            Command::new("validate")
                .about("Check a configuration file for problems")
                .long_about("Load a configuration file and report every problem found"),
            Command::new("contexts")
                .about("List every configuration below a directory")
                .long_about("Scan a directory tree and list each directory defining a configuration"),
            Command::new("write")
                .about("Convert a configuration file to either format")
                .long_about("Write a configuration in the structured or the legacy format"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("package-config.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
