fn main() {
    if let Err(err) = properties_sql::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
