use clap::Parser;
use sound_server::{assets, logger};
use std::path::PathBuf;

/// Print the checklist of sound files the game needs.
///
/// Nothing is downloaded; the files have to be fetched by hand.
#[derive(Debug, Parser)]
#[command(name = "get-sounds", version)]
struct Cli {
    /// Directory the sound files go into
    #[arg(long, default_value = assets::DEFAULT_SOUNDS_DIR)]
    dir: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    // The checklist is still useful when the directory cannot be created
    if let Err(e) = assets::prepare_dir(&cli.dir) {
        logger::log_warning(&format!(
            "Could not create {}: {e}",
            cli.dir.display()
        ));
    }

    println!("{}", assets::render_checklist(&cli.dir));

    let missing = assets::missing_sounds(&cli.dir);
    if missing.is_empty() {
        println!("All required sound files are in place.");
    } else {
        println!("{} required file(s) still missing.", missing.len());
    }
}
