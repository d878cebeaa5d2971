//! Generate the man page for cswave.
//!
//! Run with: cargo run --bin gen-man
//! The page is written to the `man/` directory.

use clap_mangen::Man;
use std::fs;
use std::path::Path;

fn main() -> std::io::Result<()> {
    let out_dir = Path::new("man");
    fs::create_dir_all(out_dir)?;

    let man = Man::new(cswave::Cli::cmd());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(out_dir.join("cswave.1"), buffer)?;
    println!("Generated: man/cswave.1");

    println!("\nInstall with: sudo cp man/cswave.1 /usr/local/share/man/man1/");
    Ok(())
}
