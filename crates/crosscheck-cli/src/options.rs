//! Command-line option parsing.

use crosscheck_core::Variant;
use crosscheck_engine::EngineConfig;

use crate::error::OptionsError;

/// Parsed command-line options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Requested transposition table slots (`-h`, rounded down to a prime
    /// by the engine).
    pub hash_slots: usize,
    /// Worker count (`-t`).
    pub threads: usize,
    /// Root search depth (`-d`).
    pub depth: u8,
    /// Game variant (`-m` selects King's-Cross).
    pub variant: Variant,
    /// Verbose output: per-root evaluations and table statistics (`-v`).
    pub verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            hash_slots: 99_991,
            threads: 8,
            depth: 9,
            variant: Variant::ThreeChecks,
            verbose: false,
        }
    }
}

impl Options {
    /// Parse options from an argument iterator (program name excluded).
    pub fn parse_args<I>(args: I) -> Result<Options, OptionsError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = Options::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" => {
                    options.hash_slots = numeric_flag(&mut args, "-h", 1, 1_000_000)? as usize;
                }
                "-t" => {
                    options.threads = numeric_flag(&mut args, "-t", 1, 64)? as usize;
                }
                "-d" => {
                    options.depth = numeric_flag(&mut args, "-d", 1, 12)? as u8;
                }
                "-m" => options.variant = Variant::KingsCross,
                "-v" => options.verbose = true,
                _ => return Err(OptionsError::UnknownFlag { flag: arg }),
            }
        }
        Ok(options)
    }

    /// Translate the options into an engine configuration.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            variant: self.variant,
            depth: self.depth,
            threads: self.threads,
            hash_slots: self.hash_slots,
        }
    }
}

fn numeric_flag<I>(
    args: &mut I,
    flag: &'static str,
    min: u64,
    max: u64,
) -> Result<u64, OptionsError>
where
    I: Iterator<Item = String>,
{
    let value = args.next().ok_or(OptionsError::MissingValue { flag })?;
    let parsed: u64 = value
        .parse()
        .map_err(|_| OptionsError::InvalidValue { flag, value: value.clone() })?;
    if !(min..=max).contains(&parsed) {
        return Err(OptionsError::OutOfRange { flag, value: parsed, min, max });
    }
    Ok(parsed)
}
