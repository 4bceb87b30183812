//! Command line entry point (native).

#[cfg(feature = "native")]
fn main() {
    env_logger::init();

    let options = match pagecraft_app::CliOptions::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}\n\n{}", e, pagecraft_app::cli::USAGE);
            std::process::exit(2);
        }
    };

    if let Err(e) = pollster::block_on(pagecraft_app::run(options)) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
