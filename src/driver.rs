use std::process::ExitCode;

use argh::FromArgs;

mod cmd_parse;

#[derive(FromArgs)]
/// A front-end for a curly-brace systems language, backed by a hand-rolled
/// PEG analyzer.
struct Args {
    #[argh(subcommand)]
    subcommand: Subcommand,
}

#[derive(FromArgs)]
/// parse something
#[argh(subcommand)]
enum Subcommand {
    Parse(cmd_parse::Parse),
}

impl Subcommand {
    fn run(self) -> ExitCode {
        match self {
            Subcommand::Parse(cmd) => cmd.run(),
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    argh::from_env::<Args>().subcommand.run()
}

