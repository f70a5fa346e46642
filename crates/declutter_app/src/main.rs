use clap::Parser;
use declutter_app::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    if let Err(error) = engine_logging::initialize(&cli.log_destination(), cli.log_level()) {
        eprintln!("Warning: cannot write {}: {error}", cli.log_file.display());
    }

    match declutter_app::run(&cli).await {
        Ok(report) => declutter_app::print_report(&report),
        Err(error) => {
            eprintln!("Error: {error:#}");
            std::process::exit(1);
        }
    }
}
