//! xmlsift CLI: driving adapter for the xmlsift document filter.
//!
//! Subcommands:
//! - `run [config] [--base-dir DIR] [-v|-q]`: copy matching documents
//! - `check <config> [--base-dir DIR]`: validate config and show resolved paths
//! - `facts <file.xml> [--ignore-case]`: print a document's extracted facts
//! - `explain <config> <file.xml>`: show which conditions hold for one document

use std::path::{Path, PathBuf};
use std::process;

use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use xmlsift::{CaseSensitivity, DocumentMatcher, FactMapping, SiftConfig, Sifter};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let options = match parse_options(&args[2..]) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {e}");
            print_usage();
            process::exit(1);
        }
    };

    let result = match args[1].as_str() {
        "run" => {
            init_logging(&options);
            cmd_run(&options)
        }
        "check" => cmd_check(&options),
        "facts" => cmd_facts(&options),
        "explain" => cmd_explain(&options),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_run(options: &Options) -> Result<(), String> {
    let base = options.base_dir()?;
    let config_path = options.config_path(&base);
    debug!(config = %config_path.display(), base = %base.display(), "loading config");
    let config = SiftConfig::load(&config_path)
        .map_err(|e| format!("config load failed: {e}"))?
        .resolve(&base);

    let summary = Sifter::new(&config).run().map_err(|e| e.to_string())?;

    if summary.stopped_early {
        if let Some(copy) = summary.copies.first() {
            println!("Stopped after first match: {}", copy.destination.display());
        }
    } else {
        println!("\nDone: {} file(s) matched", summary.matched);
        println!("Copied to: {}", summary.output_dir.display());
    }
    if summary.failed > 0 {
        println!("{} file(s) could not be read", summary.failed);
    }
    Ok(())
}

fn cmd_check(options: &Options) -> Result<(), String> {
    let config_arg = options
        .positional
        .first()
        .ok_or("check requires a config file path")?;
    let base = options.base_dir()?;
    let config = SiftConfig::load(Path::new(config_arg))
        .map_err(|e| format!("config invalid: {e}"))?
        .resolve(&base);

    println!("Config valid");
    println!("Input roots:");
    for root in &config.input_dirs {
        let state = if root.is_dir() { "ok" } else { "missing" };
        println!("  {} ({state})", root.display());
    }
    println!("Output: {}", config.output_dir.display());
    println!(
        "Mode: {}, case-sensitive: {}, stop after first match: {}",
        config.conditions.mode(),
        config.case.is_sensitive(),
        config.stop_after_first_match
    );
    println!("Conditions:");
    for condition in config.conditions.conditions() {
        println!("  {} {:?}", condition.key(), condition.expected());
    }
    Ok(())
}

fn cmd_facts(options: &Options) -> Result<(), String> {
    let file = options
        .positional
        .first()
        .ok_or("facts requires an XML file path")?;
    let case = CaseSensitivity::from_flag(!options.ignore_case);
    let facts = FactMapping::extract(Path::new(file), case).map_err(|e| e.to_string())?;

    if facts.is_empty() {
        println!("(no facts)");
    }
    for (key, values) in &facts {
        let values: Vec<&str> = values.iter().map(String::as_str).collect();
        println!("{key}: {}", values.join(", "));
    }
    Ok(())
}

fn cmd_explain(options: &Options) -> Result<(), String> {
    let [config_arg, file] = options.positional.as_slice() else {
        return Err("explain requires a config file path and an XML file path".into());
    };
    let config = SiftConfig::load(Path::new(config_arg))
        .map_err(|e| format!("config invalid: {e}"))?;
    let matcher = DocumentMatcher::new(&config.conditions, config.case);
    let trace = matcher
        .explain(Path::new(file))
        .map_err(|e| e.to_string())?;

    print!("{trace}");
    println!("{}", if trace.matched() { "MATCH" } else { "(no match)" });
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Logging
// ═══════════════════════════════════════════════════════════════════════════════

fn init_logging(options: &Options) {
    let filter = match options.log_level() {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Argument parsing
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
struct Options {
    positional: Vec<String>,
    base_dir: Option<PathBuf>,
    ignore_case: bool,
    verbose: bool,
    quiet: bool,
}

impl Options {
    /// Explicit `--base-dir`, else the directory holding the executable.
    fn base_dir(&self) -> Result<PathBuf, String> {
        if let Some(dir) = &self.base_dir {
            return Ok(dir.clone());
        }
        let exe = std::env::current_exe()
            .map_err(|e| format!("cannot locate the executable: {e}"))?;
        exe.parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| format!("\"{}\" has no parent directory", exe.display()))
    }

    fn config_path(&self, base: &Path) -> PathBuf {
        self.positional
            .first()
            .map_or_else(|| base.join(xmlsift::DEFAULT_CONFIG_FILE), PathBuf::from)
    }

    fn log_level(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("warn")
        } else {
            None
        }
    }
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--base-dir" => {
                i += 1;
                let dir = args
                    .get(i)
                    .ok_or("--base-dir requires a directory argument")?;
                options.base_dir = Some(PathBuf::from(dir));
            }
            "--ignore-case" | "-i" => options.ignore_case = true,
            "--verbose" | "-v" => options.verbose = true,
            "--quiet" | "-q" => options.quiet = true,
            flag if flag.starts_with('-') => {
                return Err(format!("unexpected argument \"{flag}\""));
            }
            positional => options.positional.push(positional.to_owned()),
        }
        i += 1;
    }

    if options.verbose && options.quiet {
        return Err("--verbose and --quiet cannot be combined".into());
    }
    Ok(options)
}

fn print_usage() {
    eprintln!(
        "Usage: xmlsift <command> [options]

Commands:
  run [config] [--base-dir DIR] [-v|-q]   Copy matching documents (default config: {} next to the executable)
  check <config> [--base-dir DIR]         Validate config and show resolved paths
  facts <file.xml> [--ignore-case]        Print the tag/value facts of a document
  explain <config> <file.xml>             Show which conditions hold for a document
  help                                    Show this help

Relative paths inside the config are resolved against --base-dir, or the
executable's directory when --base-dir is not given.",
        xmlsift::DEFAULT_CONFIG_FILE
    );
}
