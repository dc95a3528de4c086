use clap::Parser;
use std::path::PathBuf;

pub const HELP_KEYS: &str = "\
Key Bindings:
  Esc / q       : Quit
  Left / h      : Previous image
  Right / l     : Next image
  Space         : Next image
  o             : Select folder
";

#[derive(Parser, Debug)]
#[command(name = "imgview", about = "Browse the images of a folder one at a time", after_help = HELP_KEYS)]
pub struct Cli {
    /// Folder to open at startup (otherwise pick one from the window)
    pub folder: Option<PathBuf>,

    /// Initial window width in logical pixels
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value = "600")]
    pub height: u32,
}
