use clap::Parser;
use screen_keys::assign::init_identifiers;
use screen_keys::cli::commands::{apply_timeout, cmd_inspect, cmd_keys, cmd_run};
use screen_keys::cli::config::{Cli, Commands, load_config};
use screen_keys::trace::logger::init_logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = load_config(cli.config.as_deref());
    init_identifiers(config.identifiers.enabled)?;

    match cli.command {
        Commands::Keys {
            descriptors,
            root,
            json,
        } => {
            cmd_keys(&descriptors, root.as_deref(), json)?;
        }
        Commands::Inspect { source } => {
            cmd_inspect(&source, &config)?;
        }
        Commands::Run {
            descriptors,
            spec,
            source,
            format,
            output,
            timeout,
        } => {
            // CLI > config > defaults
            apply_timeout(&mut config, timeout);
            let format = format.unwrap_or_else(|| config.run.format.clone());
            let output = output.or_else(|| config.run.output.clone());

            let all_passed = cmd_run(&descriptors, &spec, &source, &format, output.as_deref(), &config)?;
            if !all_passed {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
