use std::process;

use head_count::config::Config;
use head_count::data_handling::Store;
use head_count::textinterface::TextInterface;

fn main() {
    env_logger::init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    let store = match Store::open(&config.database) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Could not open {}: {}", config.database, e);
            process::exit(1);
        }
    };

    let mut interface = TextInterface::init(store, &config);

    if let Err(e) = interface.run() {
        eprintln!("Fatal: {}", e);
        process::exit(1);
    }
}
