fn main() {
    if let Err(err) = medibot::cli::main() {
        eprintln!("❌ Error: {err}");
        std::process::exit(1);
    }
}
