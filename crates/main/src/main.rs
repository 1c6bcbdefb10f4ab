use std::error::Error;

use clap::Parser;

/// Generates the CES component maintenance report sample contract.
///
/// The PDF is written next to this executable as `ces-cmr-2024-0042.pdf`,
/// replacing any previous copy. Text metrics are read from the Liberation Sans
/// fonts; set `CMR_SAMPLE_FONTS_DIR` if they are not installed system-wide.
/// Logging is controlled through `RUST_LOG`.
#[derive(Parser)]
#[command(author, version, about = "Generate the CES CMR sample contract PDF")]
struct Cli {}

fn main() {
    env_logger::init();
    let _cli = Cli::parse();

    match cmr_sample_pdf::build() {
        Ok(path) => println!("Sample PDF generated: {}", path.display()),
        Err(err) => {
            eprintln!("Error: {}", err);
            print_error_sources(&err);
            std::process::exit(1);
        }
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
