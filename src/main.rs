use clap::Parser;
use std::process;
use tucson_processor::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(status) => process::exit(status.exit_code()),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Tucson Processor - Dendrochronology Ring-Width Reader");
    println!("=====================================================");
    println!();
    println!("Read Tucson-format measurement (.rwl) and chronology (.crn) files and");
    println!("convert their series into Parquet or CSV tables.");
    println!();
    println!("USAGE:");
    println!("    tucson <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    inspect     Show the detected format, series and warnings for a file");
    println!("    convert     Convert a file to Parquet or CSV");
    println!("    validate    Check many files and report which ones read cleanly");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Increase logging verbosity (repeatable)");
    println!("    -q, --quiet      Only log errors");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Look at what the reader makes of a file:");
    println!("    tucson inspect site.rwl");
    println!();
    println!("    # Convert a chronology with BC/AD dating to CSV:");
    println!("    tucson convert site.crn -o site.csv --format csv --dating bc-ad");
    println!();
    println!("    # Check a whole collection, failing on warnings:");
    println!("    tucson validate 'data/**/*.rwl' --strict");
    println!();
    println!("For detailed help on any command, use:");
    println!("    tucson <COMMAND> --help");
}
