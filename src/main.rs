fn main() {
    if let Err(err) = devcard::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
