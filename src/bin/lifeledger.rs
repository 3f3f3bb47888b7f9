fn main() {
    lifeledger::init();
    if let Err(err) = lifeledger::cli::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
