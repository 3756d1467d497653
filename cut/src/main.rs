use std::io::{self, IsTerminal};
use std::process::exit;

use clap::Parser;

use hcut::args::{Cli, USAGE};

fn usage() {
    eprintln!("{USAGE}");
    eprintln!("Try 'hcut --help' for more information.");
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version go to stdout and succeed
            let code = if e.use_stderr() { 1 } else { 0 };
            // nowhere left to report a failed write of the message itself
            e.print().ok();
            exit(code);
        }
    };
    init_logging(cli.verbose);

    let config = match cli.into_config(io::stdin().is_terminal()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            usage();
            exit(e.exit_code());
        }
    };

    match hcut::run(&config, io::stdout().lock()) {
        Ok(_) => exit(0),
        // downstream closed the pipe (e.g. `| head`): stop quietly
        Err(e) if e.is_broken_pipe() => exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            exit(e.exit_code());
        }
    }
}
