//! CueCut command line.
//!
//! Downloads (or takes) an audio source, builds a segment plan from a cue
//! sheet or interactive prompts, and cuts one output file per segment.
//!
//! Usage:
//!   cuecut [OPTIONS] <URL-or-FILE>
//!
//! Run `cuecut --help` for the option list.

use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};

use cuecut_core::config::ConfigManager;
use cuecut_core::logging::{init_tracing, LogConfig, LogLevel, RunLoggerBuilder};
use cuecut_core::segments::{EntryTriple, TimestampError, TripleSource};
use cuecut_core::tools::FfmpegCutter;
use cuecut_core::workflow::{PlanPrompts, SourceInput, SplitJob, SplitRequest};

/// Default config file looked for next to the working directory.
const DEFAULT_CONFIG_PATH: &str = "cuecut.toml";

const USAGE: &str = "\
cuecut - download an audio source and split it into named segments

USAGE:
    cuecut [OPTIONS] <URL-or-FILE>

OPTIONS:
    --cue <path>        Cue sheet to read (name + start time per line)
    --out <dir>         Output root (overrides the configured one)
    --name <job>        Job name (defaults to the source file name)
    --last-end <ts>     End of the last cue segment (hh:mm:ss or mm:ss)
    --config <path>     Config file (default: cuecut.toml, created if absent)
    --interactive       Skip the cue sheet and enter segments by hand
    --debug             Verbose logging
    --help              Show this help
";

/// Parsed command line.
struct CliArgs {
    source: String,
    cue: Option<PathBuf>,
    out: Option<String>,
    name: Option<String>,
    last_end: Option<String>,
    config: Option<PathBuf>,
    interactive: bool,
    debug: bool,
}

fn parse_args(args: &[String]) -> Result<Option<CliArgs>> {
    let mut source = None;
    let mut cue = None;
    let mut out = None;
    let mut name = None;
    let mut last_end = None;
    let mut config = None;
    let mut interactive = false;
    let mut debug = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value_for = |flag: &str| -> Result<String> {
            iter.next()
                .cloned()
                .with_context(|| format!("{} requires a value", flag))
        };

        match arg.as_str() {
            "--help" | "-h" => return Ok(None),
            "--cue" => cue = Some(PathBuf::from(value_for("--cue")?)),
            "--out" => out = Some(value_for("--out")?),
            "--name" => name = Some(value_for("--name")?),
            "--last-end" => last_end = Some(value_for("--last-end")?),
            "--config" => config = Some(PathBuf::from(value_for("--config")?)),
            "--interactive" => interactive = true,
            "--debug" => debug = true,
            other if other.starts_with('-') => bail!("unknown option: {}", other),
            other => {
                if source.is_some() {
                    bail!("only one source argument is accepted, got '{}'", other);
                }
                source = Some(other.to_string());
            }
        }
    }

    let source = source.context("missing <URL-or-FILE> argument")?;

    Ok(Some(CliArgs {
        source,
        cue,
        out,
        name,
        last_end,
        config,
        interactive,
        debug,
    }))
}

/// TripleSource over stdin, echoing prompts to stderr.
struct StdinPrompts;

impl StdinPrompts {
    fn ask(&self, prompt: &str) -> String {
        eprint!("{}", prompt);
        let _ = io::stderr().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => line.trim().to_string(),
            // Closed stdin reads as a blank answer, which ends the session.
            Err(_) => String::new(),
        }
    }
}

impl TripleSource for StdinPrompts {
    fn next_triple(&mut self, index: u32) -> Option<EntryTriple> {
        let start = self.ask(&format!("Segment {} start (blank to finish): ", index));
        if start.is_empty() {
            return None;
        }
        let end = self.ask(&format!("Segment {} end: ", index));
        let name = self.ask(&format!("Segment {} name [Part_{}]: ", index, index));
        Some(EntryTriple::new(start, end, name))
    }

    fn entry_rejected(&mut self, index: u32, error: &TimestampError) {
        eprintln!(
            "'{}' is not a valid timestamp; re-enter segment {}",
            error.original(),
            index
        );
    }
}

impl PlanPrompts for StdinPrompts {
    fn last_end_answer(&mut self) -> Option<String> {
        let answer = self.ask("End of last segment (blank to run to the end): ");
        if answer.is_empty() {
            None
        } else {
            Some(answer)
        }
    }
}

fn run(args: CliArgs) -> Result<()> {
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let mut config = ConfigManager::new(&config_path);
    config
        .load_or_create()
        .with_context(|| format!("loading config {}", config_path.display()))?;

    if let Some(out) = &args.out {
        config.settings_mut().paths.output_root = out.clone();
    }

    let level = if args.debug {
        LogLevel::Debug
    } else {
        config.settings().logging.level
    };
    init_tracing(level);

    config.ensure_dirs_exist().context("creating directories")?;
    tracing::debug!("Using config {}", config.path().display());

    let source = SourceInput::from_arg(&args.source);
    let job_name = args.name.clone();

    // Resolve the cue sheet: explicit flag first, configured default second.
    let cue_lines = if args.interactive {
        None
    } else {
        read_cue_lines(&args, config.settings().paths.cue_file.as_str())?
    };

    let run_name = job_name
        .clone()
        .unwrap_or_else(|| source.derive_job_name());

    let log_config = if args.debug {
        LogConfig::debug()
    } else {
        config.settings().logging.to_log_config()
    };
    let logger = RunLoggerBuilder::new(&run_name, config.logs_folder())
        .config(log_config)
        .line_callback(Box::new(|line| eprintln!("{}", line)))
        .build()
        .context("creating run logger")?;

    let cutter = FfmpegCutter::from_settings(&config.settings().split);
    let job = SplitJob::new(config.settings(), &cutter, &logger);

    let request = SplitRequest {
        source,
        job_name,
        cue_lines,
        last_end: args.last_end.clone(),
    };

    let report = job.run(&request, &mut StdinPrompts)?;

    if report.no_segments {
        eprintln!("No segments were planned; nothing was written.");
    } else {
        eprintln!("Done: {} file(s).", report.outputs.len());
        for output in &report.outputs {
            eprintln!("  {}", output.display());
        }
    }

    Ok(())
}

/// Read cue lines from the explicit flag or the configured default.
///
/// An explicitly given file must exist; the configured default is optional
/// and silently skipped when absent.
fn read_cue_lines(args: &CliArgs, configured: &str) -> Result<Option<Vec<String>>> {
    let path = match (&args.cue, configured) {
        (Some(path), _) => path.clone(),
        (None, "") => return Ok(None),
        (None, configured) => {
            let path = PathBuf::from(configured);
            if !path.exists() {
                return Ok(None);
            }
            path
        }
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("reading cue sheet {}", path.display()))?;
    Ok(Some(content.lines().map(str::to_string).collect()))
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let cli = match parse_args(&args) {
        Ok(Some(cli)) => cli,
        Ok(None) => {
            print!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {}", err);
            eprintln!();
            eprint!("{}", USAGE);
            return ExitCode::from(1);
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_source_and_flags() {
        let cli = parse_args(&strings(&[
            "--cue",
            "album.cue",
            "--out",
            "cuts",
            "--last-end",
            "12:30",
            "https://example.com/v",
        ]))
        .unwrap()
        .unwrap();

        assert_eq!(cli.source, "https://example.com/v");
        assert_eq!(cli.cue.as_deref(), Some(std::path::Path::new("album.cue")));
        assert_eq!(cli.out.as_deref(), Some("cuts"));
        assert_eq!(cli.last_end.as_deref(), Some("12:30"));
        assert!(!cli.interactive);
    }

    #[test]
    fn help_short_circuits() {
        assert!(parse_args(&strings(&["--help"])).unwrap().is_none());
        assert!(parse_args(&strings(&["-h", "x"])).unwrap().is_none());
    }

    #[test]
    fn missing_source_is_an_error() {
        assert!(parse_args(&strings(&["--interactive"])).is_err());
    }

    #[test]
    fn unknown_option_is_an_error() {
        assert!(parse_args(&strings(&["--frobnicate", "x"])).is_err());
    }

    #[test]
    fn missing_value_is_an_error() {
        assert!(parse_args(&strings(&["x", "--cue"])).is_err());
    }

    #[test]
    fn second_source_is_an_error() {
        assert!(parse_args(&strings(&["a.mp3", "b.mp3"])).is_err());
    }
}
