fn main() {
    if let Err(err) = dxsh::cli::run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
