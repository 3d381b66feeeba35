use clap::Parser;

fn main() {
    let cli = favdirs_core::runtime::Cli::parse();

    if let Err(error) = favdirs_core::runtime::run(cli) {
        log::error!("runtime failed: {error}");
        log::logger().flush();
        eprintln!("[favdirs] {error}");
        let code = match error {
            favdirs_core::runtime::RuntimeError::Config(_) => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}
