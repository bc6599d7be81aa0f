use std::path::PathBuf;

use clap::{ArgAction, Args, CommandFactory, ErrorKind, Parser, Subcommand};
use serde::Serialize;

use overlap::audio::{self, Analyzer, Comparator, Fingerprint, PairResult, SearchConfig};

#[derive(Args, Debug)]
struct ConfigArgs {
    #[clap(
        long,
        default_value_t = audio::DEFAULT_TOTAL_DURATION,
        value_parser = clap::value_parser!(f64),
        help = "Duration of audio, in seconds, covered by one full fingerprint. Fingerprints are expected to be extracted from a fixed-length slice of each file."
    )]
    total_duration: f64,

    #[clap(
        long,
        default_value_t = audio::DEFAULT_HAMMING_THRESHOLD,
        value_parser = clap::value_parser!(u32),
        help = "Threshold to use when comparing hashes. The range is 0 (exact match) to 64 (no match)."
    )]
    hamming_threshold: u32,

    #[clap(
        long,
        default_value_t = audio::DEFAULT_MIN_MATCH_DURATION,
        value_parser = clap::value_parser!(f64),
        help = "Minimum match duration, in seconds. Shorter matches are reported as too short."
    )]
    min_match_duration: f64,
}

impl ConfigArgs {
    fn to_config(&self) -> SearchConfig {
        let config = SearchConfig::default()
            .with_total_duration(self.total_duration)
            .with_hamming_threshold(self.hamming_threshold)
            .with_min_match_duration(self.min_match_duration);
        if let Err(e) = config.validate() {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, e.to_string()).exit();
        }
        config
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[clap(
        arg_required_else_help = true,
        after_help = "Search for a shared intro or outro among every pair of fingerprint files. Directories are expanded to the files they contain."
    )]
    Search {
        #[clap(
            required = true,
            multiple_values = true,
            value_parser = clap::value_parser!(PathBuf),
            help = "Fingerprint files or directories to search."
        )]
        paths: Vec<PathBuf>,

        #[clap(flatten)]
        config: ConfigArgs,

        #[clap(
            long,
            default_value = "false",
            action(ArgAction::SetTrue),
            help = "Skip fingerprint files that cannot be read or parsed, along with every pair they are part of. By default, a single bad file aborts the search."
        )]
        skip_invalid: bool,

        #[clap(
            long,
            default_value = "false",
            action(ArgAction::SetTrue),
            help = "Compare pairs one at a time instead of across all CPUs."
        )]
        no_threading: bool,

        #[clap(
            long,
            default_value = "false",
            action(ArgAction::SetTrue),
            help = "Print results as JSON."
        )]
        json: bool,
    },

    #[clap(
        arg_required_else_help = true,
        after_help = "Search for a shared intro or outro between two fingerprint files."
    )]
    Compare {
        #[clap(value_parser = clap::value_parser!(PathBuf), help = "First fingerprint file.")]
        first: PathBuf,

        #[clap(value_parser = clap::value_parser!(PathBuf), help = "Second fingerprint file.")]
        second: PathBuf,

        #[clap(flatten)]
        config: ConfigArgs,

        #[clap(
            long,
            default_value = "false",
            action(ArgAction::SetTrue),
            help = "Print results as JSON."
        )]
        json: bool,
    },
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(
        short,
        long,
        global = true,
        default_value = "false",
        action(ArgAction::SetTrue),
        help = "Enable debug logging."
    )]
    verbose: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    config: SearchConfig,
    results: &'a [PairResult],
}

fn display(config: SearchConfig, results: &[PairResult], json: bool) -> overlap::Result<()> {
    if json {
        let report = Report { config, results };
        serde_json::to_writer_pretty(std::io::stdout(), &report)?;
        println!();
        return Ok(());
    }

    for result in results {
        println!("{}", result);
    }

    Ok(())
}

fn main() -> overlap::Result<()> {
    let args = Cli::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    match args.command {
        Commands::Search {
            ref paths,
            ref config,
            skip_invalid,
            no_threading,
            json,
        } => {
            let config = config.to_config();
            let files = overlap::util::find_fingerprint_files(paths)?;
            if files.len() < 2 {
                let mut cmd = Cli::command();
                cmd.error(
                    ErrorKind::InvalidValue,
                    format!(
                        "need at least 2 fingerprint files, but only found {} in provided paths",
                        files.len()
                    ),
                )
                .exit();
            }
            let comparator = Comparator::from_files(files)
                .with_config(config)
                .with_skip_invalid(skip_invalid)
                .with_threading(!no_threading);
            let results = comparator.run()?;
            display(config, &results, json)?;
        }
        Commands::Compare {
            ref first,
            ref second,
            ref config,
            json,
        } => {
            let config = config.to_config();
            let f1 = Fingerprint::from_path(first)?;
            let f2 = Fingerprint::from_path(second)?;
            let result = Analyzer::new(config).search(
                first.display().to_string(),
                f1.data(),
                second.display().to_string(),
                f2.data(),
            )?;
            display(config, &[result], json)?;
        }
    }

    Ok(())
}
