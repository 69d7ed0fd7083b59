use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "astmatch", version, about = "Match structural patterns against AST dumps")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Parse a pattern and print its canonical form
    Parse {
        /// Pattern text, e.g. 'FixnumLiteral<value = 1 | 2>'
        pattern: String,
    },

    /// Evaluate a pattern against the root node of one AST file
    Match {
        pattern: String,

        /// AST file (.json, .yml or .yaml)
        file: PathBuf,
    },

    /// Evaluate a pattern set against every node of many AST files
    Scan {
        /// Pattern-set file
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,

        /// AST files to scan
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

impl Args {
    /// Log level implied by the flags; `RUST_LOG` still takes precedence.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        }
    }
}
