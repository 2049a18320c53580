//! `pass-edit`: edit one pass record from the command line.
//!
//! Usage:
//!   pass-edit [--preview] [--standing N | --seat BLOCK,ROW,SEAT] [PATH=TEXT | PATH:=JSON]...
//!
//! The record is read from stdin in wire form; the result is written to
//! stdout. Set `RUST_LOG=debug` to trace each edit on stderr.

use passdesk_core::cli::{edit_pass, EditArgs};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = match EditArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match edit_pass(buf.trim(), &args) {
        Ok(result) => {
            let mut stdout = io::stdout();
            if let Err(e) = writeln!(stdout, "{result}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
