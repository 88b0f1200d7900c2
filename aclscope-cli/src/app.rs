use clap::{Parser, Subcommand};

/// aclscope - access mask decoding and security object path inspection
#[derive(Debug, Parser)]
#[command(name = "aclscope", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode an access mask into named rights and its permission-set label.
    Decode {
        /// Mask as 1 to 8 hex digits, e.g. 001F01FF or 0x80000000.
        #[arg(value_name = "MASK")]
        mask: String,
    },

    /// Encode named rights into an access mask.
    Encode {
        /// Right names, e.g. ReadData read-attributes "read permissions".
        #[arg(value_name = "RIGHT", required = true)]
        rights: Vec<String>,
    },

    /// Classify a path as a registry key or a filesystem object.
    Resolve {
        /// Registry path (HKLM\Software, HKEY_CURRENT_USER/...) or filesystem path.
        #[arg(value_name = "PATH")]
        path: String,
    },

    /// List the named rights, their bits and the permission-set combinations.
    Rights,
}
