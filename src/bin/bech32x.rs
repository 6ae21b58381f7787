//! Bech32X command-line tool
//!
//! Encodes hex payloads, strictly decodes strings, and corrects damaged strings.

use anyhow::{Context, Result};
use bech32x::reporters::{self, ConsoleCorrectionReporter};
use bech32x::{CorrectionConfig, HrpFilter};
use clap::{Arg, ArgAction, Command};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = Command::new("bech32x")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Encode, decode and correct Bech32X strings")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("encode")
                .visible_alias("e")
                .about("Encode a hex payload")
                .arg(
                    Arg::new("hrp")
                        .long("hrp")
                        .help("Human-readable prefix")
                        .value_name("HRP")
                        .required(true),
                )
                .arg(
                    Arg::new("payload")
                        .help("Payload bytes as hex")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("decode")
                .visible_alias("d")
                .about("Strictly decode a string (no correction)")
                .arg(
                    Arg::new("hrp")
                        .long("hrp")
                        .help("Expected prefix, or * for any")
                        .value_name("HRP")
                        .default_value("*"),
                )
                .arg(
                    Arg::new("string")
                        .help("Bech32X string")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("correct")
                .visible_alias("c")
                .about("Decode strings, repairing up to 7 errors each")
                .arg(
                    Arg::new("hrp")
                        .long("hrp")
                        .help("Expected prefix, or * for any")
                        .value_name("HRP")
                        .default_value("*"),
                )
                .arg(
                    Arg::new("strings")
                        .help("Bech32X strings")
                        .required(true)
                        .num_args(1..)
                        .index(1),
                )
                .arg(
                    Arg::new("quiet")
                        .short('q')
                        .long("quiet")
                        .help("Quiet mode - print only corrected strings")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("threads")
                        .short('t')
                        .long("threads")
                        .help("Threads for a dedicated pool (0 = rayon's global pool)")
                        .value_name("N")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("0"),
                )
                .arg(
                    Arg::new("no-parallel")
                        .long("no-parallel")
                        .help("Disable parallel correction")
                        .action(ArgAction::SetTrue),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("encode", sub_matches)) => handle_encode(sub_matches),
        Some(("decode", sub_matches)) => handle_decode(sub_matches),
        Some(("correct", sub_matches)) => handle_correct(sub_matches),
        Some((cmd, _)) => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
        None => {
            eprintln!("Error: No command specified");
            eprintln!("\nUse 'bech32x --help' for usage information");
            std::process::exit(1);
        }
    }
}

fn handle_encode(matches: &clap::ArgMatches) -> Result<()> {
    let hrp = matches.get_one::<String>("hrp").expect("hrp is required");
    let payload = matches
        .get_one::<String>("payload")
        .expect("payload is required");

    let bytes = hex::decode(payload).with_context(|| format!("Invalid hex payload: {}", payload))?;
    let encoded = bech32x::encode(hrp, &bytes).context("Failed to encode")?;
    println!("{}", encoded);
    Ok(())
}

fn handle_decode(matches: &clap::ArgMatches) -> Result<()> {
    let hrp = matches.get_one::<String>("hrp").expect("hrp has a default");
    let string = matches
        .get_one::<String>("string")
        .expect("string is required");

    let expected = HrpFilter::parse(hrp).context("Invalid expected prefix")?;
    let decoded = bech32x::decode_symbols(&expected, string).context("Failed to decode")?;
    let bytes = decoded
        .to_bytes()
        .context("Payload is not a whole number of bytes")?;

    println!("HRP: {}", decoded.hrp);
    println!("Decoded: {}", hex::encode(bytes));
    Ok(())
}

fn handle_correct(matches: &clap::ArgMatches) -> Result<()> {
    let hrp = matches.get_one::<String>("hrp").expect("hrp has a default");
    let strings: Vec<String> = matches
        .get_many::<String>("strings")
        .expect("strings are required")
        .cloned()
        .collect();
    let quiet = matches.get_flag("quiet");
    let config = CorrectionConfig::from_args(matches);

    let expected = HrpFilter::parse(hrp).context("Invalid expected prefix")?;
    let results = bech32x::correct_batch(&expected, &strings, &config);

    let reporter = ConsoleCorrectionReporter::new(quiet);
    let summary = reporters::report_batch(&strings, &results, &reporter);

    if summary.is_success() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
