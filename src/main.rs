fn main() {
    if let Err(err) = valuation_charts::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
