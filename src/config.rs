//! Run configuration, parsed from command-line flags.
//!
//! Every path has a default so the tool runs with no arguments.

use std::path::PathBuf;

use log::info;

use crate::error::{Error, Result};

pub const DEFAULT_INPUT: &str = "data/input.dat";
pub const DEFAULT_OUTPUT: &str = "data/output.dat";
pub const DEFAULT_TREE_IMAGE: &str = "data/huffman_tree";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Corpus file; created with sample text when missing
    pub input_file: PathBuf,

    /// Report file
    pub output_file: PathBuf,

    /// Base path for the `.dot` and `.png` tree rendering
    pub tree_image: PathBuf,

    pub render: bool,

    /// `--help` was given; nothing else should run
    pub help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from(DEFAULT_INPUT),
            output_file: PathBuf::from(DEFAULT_OUTPUT),
            tree_image: PathBuf::from(DEFAULT_TREE_IMAGE),
            render: true,
            help: false,
        }
    }
}

impl Config {
    /// Parses flags, without the program name.
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut config = Config::default();
        let mut args = args.iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--in" => config.input_file = path_value(&mut args, "--in")?,
                "--out" => config.output_file = path_value(&mut args, "--out")?,
                "--tree-image" => config.tree_image = path_value(&mut args, "--tree-image")?,
                "--no-render" => config.render = false,
                "--help" | "-h" => config.help = true,
                other => return Err(Error::Config(format!("unknown argument: {}", other))),
            }
        }

        Ok(config)
    }

    pub fn print(&self) {
        info!("Input file:  {}", self.input_file.display());
        info!("Output file: {}", self.output_file.display());
        if self.render {
            info!("Tree image:  {}.png", self.tree_image.display());
        } else {
            info!("Tree image:  (disabled)");
        }
    }
}

fn path_value<'a>(args: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<PathBuf> {
    args.next()
        .map(PathBuf::from)
        .ok_or_else(|| Error::Config(format!("{} requires a path", flag)))
}

pub fn print_help() {
    println!("encode: word-level Huffman coding of text blocks");
    println!();
    println!("USAGE:");
    println!("    encode [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --in <PATH>          Corpus file (default: {})", DEFAULT_INPUT);
    println!("    --out <PATH>         Report file (default: {})", DEFAULT_OUTPUT);
    println!("    --tree-image <PATH>  Tree rendering base path (default: {})", DEFAULT_TREE_IMAGE);
    println!("    --no-render          Skip the Graphviz tree rendering");
    println!("    --help, -h           Print this help");
    println!();
    println!("Blocks in the corpus are separated by blank lines. Set RUST_LOG for logs.");
}
