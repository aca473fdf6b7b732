use bitperm::cli::{
    apply_values, format_report, generate_transform, info_report, report, ApplyOptions,
    GenerateOptions, TransformKind, TransformReport,
};
use bitperm::DEFAULT_PROBABILITY;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Version info from build.rs
const VERSION: &str = env!("BITPERM_VERSION");
const PROFILE: &str = env!("BITPERM_PROFILE");
const GIT_HASH: &str = env!("BITPERM_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} ({})", PROFILE, VERSION, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "bitperm")]
#[command(about = "Bit permutations, XOR inversions and shuffles of arbitrary-width integers", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random transform
    #[command(alias = "g")]
    Generate {
        /// Transform kind: permutation, derangement, involution, inversion or shuffle
        #[arg(long, default_value = "shuffle", value_parser = parse_kind)]
        kind: TransformKind,

        /// Exact length of the result (at most 1023)
        #[arg(long, short = 'n', default_value = "64")]
        length: usize,

        /// Chance a point or bit is left alone (involution, inversion)
        #[arg(long, default_value_t = DEFAULT_PROBABILITY)]
        probability: f64,

        /// Passphrase for reproducible output
        #[arg(long)]
        seed: Option<String>,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },

    /// Describe a packed transform
    #[command(alias = "i")]
    Info {
        /// Packed integer (decimal, 0x or 0b)
        packed: String,

        /// How to decode the integer
        #[arg(long, default_value = "shuffle", value_parser = parse_kind)]
        kind: TransformKind,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },

    /// Run values through a packed transform
    #[command(alias = "a")]
    Apply {
        /// Packed integer (decimal, 0x or 0b)
        packed: String,

        /// Values to transform
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,

        /// How to decode the packed integer
        #[arg(long, default_value = "shuffle", value_parser = parse_kind)]
        kind: TransformKind,

        /// Undo the transform instead of applying it
        #[arg(long)]
        invert: bool,
    },
}

fn parse_kind(s: &str) -> Result<TransformKind, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn print_report(summary: &TransformReport, json: bool) -> bitperm::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        print!("{}", format_report(summary));
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("bitperm {}", get_version());
        return ExitCode::SUCCESS;
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            if let Err(e) = Cli::command().print_help() {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
            println!();
            return ExitCode::SUCCESS;
        }
    };

    let result = match command {
        Commands::Generate {
            kind,
            length,
            probability,
            seed,
            json,
        } => {
            let options = GenerateOptions {
                kind,
                length,
                probability,
                seed,
            };
            generate_transform(&options).and_then(|transform| print_report(&report(&transform), json))
        }

        Commands::Info { packed, kind, json } => {
            info_report(kind, &packed).and_then(|summary| print_report(&summary, json))
        }

        Commands::Apply {
            packed,
            values,
            kind,
            invert,
        } => {
            let options = ApplyOptions {
                kind,
                packed,
                invert,
            };
            apply_values(&options, &values).map(|results| {
                for value in results {
                    println!("{}", value);
                }
            })
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
