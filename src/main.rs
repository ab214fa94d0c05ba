fn main() {
    if let Err(err) = moviedb_init::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
