fn main() {
    // Git commit + build metadata for /health, X-App and --version.
    if let Err(err) = built::write_built_file() {
        println!("cargo:warning=failed to acquire build-time information: {err}");
        std::process::exit(1);
    }
}
