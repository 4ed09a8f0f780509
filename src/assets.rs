//! Sound asset checklist
//!
//! The game's audio cannot be downloaded automatically, so `get-sounds`
//! only prepares the target directory and prints what the operator has to
//! fetch by hand.

use std::fmt::Write as _;
use std::io;
use std::path::Path;

/// Default directory the sounds are placed in
pub const DEFAULT_SOUNDS_DIR: &str = "sounds";

/// One audio file the game loads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundAsset {
    pub file_name: &'static str,
    /// Whether the game needs it; music stops on the battlefield
    pub required: bool,
}

pub const SOUNDS: &[SoundAsset] = &[
    SoundAsset {
        file_name: "menu-music.mp3",
        required: true,
    },
    SoundAsset {
        file_name: "battlefield-music.mp3",
        required: false,
    },
    SoundAsset {
        file_name: "rifle-shoot.mp3",
        required: true,
    },
    SoundAsset {
        file_name: "pistol-shoot.mp3",
        required: true,
    },
    SoundAsset {
        file_name: "bullet-shoot.mp3",
        required: true,
    },
];

/// Where free sounds can be found
pub const SOURCES: &[&str] = &[
    "https://freesound.org/",
    "https://pixabay.com/music/",
    "https://mixkit.co/free-stock-music/",
];

pub fn required_sounds() -> impl Iterator<Item = &'static SoundAsset> {
    SOUNDS.iter().filter(|s| s.required)
}

/// Create the sounds directory if it does not exist
pub fn prepare_dir(dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)
}

/// Required sounds not yet present in `dir`
pub fn missing_sounds(dir: &Path) -> Vec<&'static str> {
    required_sounds()
        .filter(|s| !dir.join(s.file_name).is_file())
        .map(|s| s.file_name)
        .collect()
}

/// Console transcript printed by `get-sounds`
pub fn render_checklist(dir: &Path) -> String {
    let rule = "=".repeat(50);
    let dir_name = dir.display();
    let mut out = String::new();

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Game Sound Files Setup");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "\nSince direct downloads are restricted, please:");
    let _ = writeln!(out, "1. Open generate-sounds.html in your browser");
    let _ = writeln!(out, "2. Click buttons to generate WAV files");
    let _ = writeln!(out, "3. Convert WAV to MP3 using an online converter");
    let _ = writeln!(out, "4. Place MP3 files in the {dir_name}/ directory");
    let _ = writeln!(out, "\nOR download free sounds from:");
    for source in SOURCES {
        let _ = writeln!(out, "- {source}");
    }
    let _ = writeln!(out, "\nRequired files:");
    for sound in required_sounds() {
        let status = if dir.join(sound.file_name).is_file() {
            "present"
        } else {
            "missing"
        };
        let _ = writeln!(out, "  - {} ({status})", sound.file_name);
    }
    let _ = write!(out, "\n{rule}");
    out
}
