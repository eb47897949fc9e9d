use std::env;
use std::process::ExitCode;

use log::{debug, error};

pub fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "url-shape".to_owned());
    let Some(prompt) = args.next() else {
        eprintln!("Usage: {program} STRING");
        return ExitCode::FAILURE;
    };

    let nfa = match url_shape::url_automaton() {
        Ok(nfa) => nfa,
        Err(err) => {
            error!("could not build the url automaton: {err}");
            return ExitCode::FAILURE;
        }
    };
    debug!("{nfa}");

    println!("{}", url_shape::prefix_len(&nfa, &prompt));
    ExitCode::SUCCESS
}
