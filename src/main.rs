use clap::{Arg, ArgAction, Command};
use std::io;
use tracing::Level;

fn main() {
    let matches = Command::new("calc")
        .about("Evaluates `<num> <op> <num>` or a chain of operations; runs a demo otherwise")
        .arg(
            Arg::new("args")
                .help("Operands and operators, e.g. `10 + 5`")
                .value_name("ARGS")
                .num_args(0..)
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::new("chain")
                .short('c')
                .long("chain")
                .help("Read ARGS as a chain: <num> (<op> <num>)+")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log evaluation details to stderr")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = matches
        .get_many::<String>("args")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    // Failures are reported as text; the exit status stays 0.
    let stdout = io::stdout();
    if let Err(error) = calc::run(&args, matches.get_flag("chain"), &mut stdout.lock()) {
        eprintln!("Error writing output: {}", error);
    }
}
