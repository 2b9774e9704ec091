fn main() {
    pretty_env_logger::init();

    if let Err(err) = hand2voc::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
