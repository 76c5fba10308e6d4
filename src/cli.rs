//! CLI argument definitions using clap derive macros.

use abc::download::{DownloadOptions, DownloadRequest};

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Download a file over HTTP(S), retrying and resuming as needed.
///
/// Without a destination file, only the size and range support of the
/// resource are printed.
#[derive(Parser, Debug)]
#[command(name = "abc")]
#[command(author, version, about)]
pub struct Args {
    /// Source URL, then destination file
    #[arg(value_name = "URL|FILE", num_args = 0..=2)]
    pub positional: Vec<String>,

    /// Source URL
    #[arg(short = 'i', long = "input", value_name = "URL")]
    pub input: Option<String>,

    /// Destination file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Set Range header (e.g. 0-1023)
    #[arg(long)]
    pub range: Option<String>,

    /// Set User-Agent header
    #[arg(long, value_name = "USER_AGENT")]
    pub agent: Option<String>,

    /// Set connection timeout (e.g. 500ms, 30s, 2m, 1h30m)
    #[arg(long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// Number of retries (unlimited when omitted)
    #[arg(long)]
    pub retry: Option<u32>,

    /// Don't display debug messages, such as errors
    #[arg(long)]
    pub nodebug: bool,

    /// Don't display progress
    #[arg(long)]
    pub noprogress: bool,

    /// If file already exists, delete and download new
    #[arg(long)]
    pub nokeep: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Assemble the download request, filling URL then destination from
    /// the positional arguments not covered by `-i`/`-o`.
    pub fn to_request(&self) -> Result<DownloadRequest, String> {
        let mut positional = self.positional.iter().cloned();
        let url = self.input.clone().or_else(|| positional.next());
        let file = self
            .output
            .clone()
            .or_else(|| positional.next().map(PathBuf::from));
        if let Some(extra) = positional.next() {
            return Err(format!("unexpected argument '{}'", extra));
        }

        let mut request = match url {
            Some(url) => DownloadRequest::new(url),
            None => DownloadRequest::default(),
        };
        if let Some(file) = file {
            request = request.destination(file);
        }
        if let Some(ref range) = self.range {
            request = request.range(range.clone());
        }
        if let Some(ref agent) = self.agent {
            request = request.user_agent(agent.clone());
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        if let Some(retry) = self.retry {
            request = request.retry_limit(retry);
        }

        Ok(request.options(DownloadOptions {
            suppress_debug: self.nodebug,
            suppress_progress: self.noprogress,
            discard_existing: self.nokeep,
        }))
    }

    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Parse a duration made of `<number><unit>` pairs, units being `ns`, `us`,
/// `ms`, `s`, `m` and `h`.
pub fn parse_duration(value: &str) -> Result<Duration, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("empty duration".into());
    }

    let mut total = Duration::ZERO;
    let mut rest = value;
    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(|| format!("missing unit in duration '{}'", value))?;
        let number: f64 = rest[..digits]
            .parse()
            .map_err(|_| format!("invalid duration '{}'", value))?;
        rest = &rest[digits..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let seconds = match &rest[..unit_len] {
            "ns" => number / 1e9,
            "us" | "µs" => number / 1e6,
            "ms" => number / 1e3,
            "s" => number,
            "m" => number * 60.0,
            "h" => number * 3600.0,
            unit => return Err(format!("unknown unit '{}' in duration '{}'", unit, value)),
        };
        rest = &rest[unit_len..];

        total += Duration::try_from_secs_f64(seconds)
            .map_err(|_| format!("duration '{}' out of range", value))?;
    }
    Ok(total)
}
