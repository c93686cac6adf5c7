fn main() {
    if let Err(err) = listing_prep::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
