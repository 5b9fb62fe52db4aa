use clap::Parser;
use tsbindgen_cli::{Cli, Command, logging, run_generate};

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => {
            logging::init(args.verbose, &args.log_categories);
            let code = run_generate(&args, None);
            std::process::exit(code.code());
        }
    }
}
