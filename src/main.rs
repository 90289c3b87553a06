use std::io;
use std::process::ExitCode;

use gstbill::form::{Prompter, Session};
use gstbill::render::RenderConfig;
use tracing::Level;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_writer(io::stderr)
        .init();

    let mut session = Session::new(RenderConfig::default());
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    match prompter.run(&mut session) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gstbill: {e}");
            ExitCode::FAILURE
        }
    }
}
