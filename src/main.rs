fn main() {
    if let Err(err) = scatter_rs_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
