use clap::Parser;
use log::{info, warn};
use std::{fmt::Display, fmt::Formatter};

/// Extension added to compressed files.
pub const EXTENSION: &str = "hfm";

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

/// Zip, Unzip, Test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct HuffOpts {
    /// Name of the file to read for input. None reads standard input.
    pub file: Option<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HuffOpts {
    pub fn new() -> Self {
        Self {
            file: None,
            force_overwrite: false,
            keep_input_files: false,
            op_mode: Mode::Zip,
            output: Output::File,
            verbose: Verbosity::Warnings,
        }
    }

    /// Put command line information from CLAP into our internal structure.
    pub fn from_args(args: Args) -> Self {
        let mut opts = HuffOpts::new();
        opts.file = args.filename;
        opts.op_mode = if args.test {
            Mode::Test
        } else if args.decompress {
            Mode::Unzip
        } else {
            Mode::Zip
        };
        opts.force_overwrite = args.force;
        opts.keep_input_files = args.keep;
        // Without an input file there is no output file name to derive.
        if args.stdout || opts.file.is_none() {
            opts.output = Output::Stdout;
        }
        opts.verbose = if args.quiet {
            Verbosity::Quiet
        } else {
            match args.verbose {
                0 => Verbosity::Warnings,
                1 => Verbosity::Info,
                2 => Verbosity::Debug,
                _ => Verbosity::Trace,
            }
        };
        opts
    }

    /// Name of the file the result goes to, or None when writing to stdout or only testing.
    pub fn output_name(&self) -> Option<String> {
        if self.output == Output::Stdout || self.op_mode == Mode::Test {
            return None;
        }
        let fname = self.file.as_ref()?;
        Some(match self.op_mode {
            Mode::Zip => format!("{}.{}", fname, EXTENSION),
            _ => match fname.strip_suffix(&format!(".{}", EXTENSION)) {
                Some(stem) if !stem.is_empty() => stem.to_string(),
                _ => format!("{}.out", fname),
            },
        })
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "A static huffman file compressor",
    long_about = "
    Compresses a file with a single static huffman code built from the byte frequencies of
    the whole file. The code is stored with the data, so the file can be restored exactly.

    Already compressed or random data usually gets a little bigger. That is reported, not
    treated as an error."
)]
pub struct Args {
    /// Filename of file to process (standard input if omitted)
    #[clap()]
    pub filename: Option<String>,

    /// Perform compression on the input file (default)
    #[clap(short = 'z', long = "compress")]
    pub compress: bool,

    /// Perform decompression on the input file
    #[clap(short = 'd', long = "decompress")]
    pub decompress: bool,

    /// Test compressed file integrity
    #[clap(short = 't', long = "test")]
    pub test: bool,

    /// Force overwriting output file
    #[clap(short = 'f', long = "force")]
    pub force: bool,

    /// Keep input file
    #[clap(short = 'k', long = "keep")]
    pub keep: bool,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout")]
    pub stdout: bool,

    /// Suppress noncritical messages
    #[clap(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Be verbose (repeat for more)
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse the command line, set the log level and report what we are about to do.
pub fn huffopts_init() -> HuffOpts {
    let opts = HuffOpts::from_args(Args::parse());

    // Set the log level
    match opts.verbose {
        Verbosity::Quiet => log::set_max_level(log::LevelFilter::Off),
        Verbosity::Errors => log::set_max_level(log::LevelFilter::Error),
        Verbosity::Warnings => log::set_max_level(log::LevelFilter::Warn),
        Verbosity::Info => log::set_max_level(log::LevelFilter::Info),
        Verbosity::Debug => log::set_max_level(log::LevelFilter::Debug),
        Verbosity::Trace => log::set_max_level(log::LevelFilter::Trace),
    };

    info!("---- Huffpack Initialization Start ----",);
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    match &opts.file {
        Some(s) => info!("Getting input from the file {}", s),
        None => warn!("Reading from stdin"),
    }
    info!("Output to {}", opts.output);
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.keep_input_files {
        info!("Keeping input files")
    };
    info!("---- Huffpack Initialization End ----\n");
    opts
}
