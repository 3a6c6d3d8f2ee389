use clap::Parser;
use dayport::application::{self, ImportOptions};
use dayport::cli::{format_import_summary, format_repack_summary, Cli, Commands};
use dayport::error::DayportError;
use dayport::infrastructure::{logging, Config};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), DayportError> {
    match cli.command {
        Commands::Import {
            facebook_exports,
            post_files,
            media_root,
            name,
            output,
        } => {
            let config = Config::load(cli.config.as_deref())?;
            let options = ImportOptions {
                facebook_exports,
                post_files,
                media_root,
                name,
                output,
            };
            let summary = application::import(&config, options)?;
            println!("{}", format_import_summary(&summary));
            Ok(())
        }
        Commands::Dump { archive } => {
            let stdout = std::io::stdout();
            application::dump(&archive, stdout.lock())?;
            Ok(())
        }
        Commands::Repack { input, output } => {
            let summary = application::repack(&input, &output)?;
            println!("{}", format_repack_summary(&summary));
            Ok(())
        }
    }
}
