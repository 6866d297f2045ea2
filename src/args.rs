use clap::{crate_version, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "Easier ECLIPSE mod generator")]
#[command(version = crate_version!())]
#[command(about = "Render the ECLIPSE difficulty presets into a mod file", long_about = None)]
pub struct Args {
    /// debug to console
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// directory the mod file is written to
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// external program that compiles the mod text into a .blcm file
    #[arg(long, default_value = "modprocessor")]
    pub compiler: String,

    /// write the human readable mod text instead of compiling it
    #[arg(long, conflicts_with = "stdout")]
    pub text: bool,

    /// print the mod text instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// print the available presets and exit
    #[arg(short, long)]
    pub list: bool,
}

impl Args {
    /// whether this run needs the external compiler
    pub fn needs_compiler(&self) -> bool {
        !(self.text || self.stdout || self.list)
    }
}
