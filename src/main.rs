use cidr_consolidate::consolidate_file;
use cidr_consolidate::output::{print_summary, to_json};
use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use std::error::Error;
use std::path::PathBuf;

/// Consolidate a list of IP prefixes into the minimal equivalent CIDR set
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file with one address or CIDR prefix per line
    #[arg(short, long)]
    input: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Warn and skip malformed lines instead of aborting
    #[arg(long)]
    skip_invalid: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    init_logging();
    let args = Args::parse();
    log::info!("#Start main()");

    let (input_count, consolidated) = consolidate_file(&args.input, args.skip_invalid)?;

    match args.format {
        Format::Text => print_summary(input_count, &consolidated),
        Format::Json => println!("{}", to_json(&consolidated)?),
    }
    Ok(())
}

/// Use log4rs.yml when present, otherwise a console config at warn level.
fn init_logging() {
    if log4rs::init_file("log4rs.yml", Default::default()).is_ok() {
        return;
    }
    let stderr = ConsoleAppender::builder().target(Target::Stderr).build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))
        .expect("Error building log4rs config");
    log4rs::init_config(config).expect("Error initializing log4rs");
}
