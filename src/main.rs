fn main() {
    if let Err(err) = table_ingest::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
