use std::process;

use solidarity::config::Config;
use solidarity::notify::{Notifier, TerminalChannel};
use solidarity::storage::Storage;
use solidarity::{cli, logging};

fn main() {
    logging::init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let path = Storage::default_path().unwrap_or_else(|| {
        eprintln!("Could not determine home directory.");
        process::exit(1);
    });

    let storage = match Storage::open(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to initialize storage: {e}");
            process::exit(1);
        }
    };

    let mut notifier = Notifier::new(TerminalChannel);
    notifier.request_permission();

    if let Err(e) = cli::run(&config, &storage, &mut notifier) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
