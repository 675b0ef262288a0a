//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

use huffpack::tools::cli::{huffopts_init, HuffOpts, Mode, Output, Verbosity};
use huffpack::{compress, decompress};

use log::{info, warn, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> Result<(), io::Error> {
    // Available log levels are Error, Warn, Info, Debug, Trace. Logs go to stderr so that
    // stdout stays clean for -c.
    TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let opts = huffopts_init();

    let input = read_input(&opts)?;

    //----- Figure how what we need to do and go do it
    let result = match opts.op_mode {
        Mode::Zip => compress(&input)?,
        Mode::Unzip => decompress(&input)?,
        Mode::Test => {
            let restored = decompress(&input)?;
            if opts.verbose > Verbosity::Quiet {
                eprintln!(
                    "{}: ok ({} bytes)",
                    opts.file.as_deref().unwrap_or("(stdin)"),
                    restored.len()
                );
            }
            return Ok(());
        }
    };

    write_output(&opts, &result)?;
    report(&opts, input.len(), result.len());

    // Like bzip2, the input goes away once the output is safely written.
    if let (Some(fname), Output::File) = (&opts.file, opts.output) {
        if !opts.keep_input_files {
            fs::remove_file(fname)?;
            info!("Removed {}", fname);
        }
    }

    info!("Done.\n");
    Ok(())
}

/// Read the whole input file (or stdin) into memory.
fn read_input(opts: &HuffOpts) -> io::Result<Vec<u8>> {
    match &opts.file {
        Some(fname) => fs::read(fname),
        None => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Write the result to the derived output file, or to stdout.
fn write_output(opts: &HuffOpts, data: &[u8]) -> io::Result<()> {
    match opts.output_name() {
        Some(fname) => {
            if Path::new(&fname).exists() && !opts.force_overwrite {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{} already exists (use -f to overwrite)", fname),
                ));
            }
            fs::write(&fname, data)?;
            info!("Wrote {} bytes to {}", data.len(), fname);
            Ok(())
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()
        }
    }
}

/// Tell the user how the sizes compare.
fn report(opts: &HuffOpts, in_len: usize, out_len: usize) {
    if opts.op_mode == Mode::Zip && out_len > in_len {
        warn!(
            "Output is {} bytes larger than the input.",
            out_len - in_len
        );
    }
    if opts.verbose > Verbosity::Quiet {
        let (raw, packed) = match opts.op_mode {
            Mode::Zip => (in_len, out_len),
            _ => (out_len, in_len),
        };
        let ratio = if raw == 0 {
            0.0
        } else {
            packed as f64 / raw as f64
        };
        eprintln!(
            "{}: {} bytes -> {} bytes ({:.3} of original)",
            opts.file.as_deref().unwrap_or("(stdin)"),
            in_len,
            out_len,
            ratio
        );
    }
}
