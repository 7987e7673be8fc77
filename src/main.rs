use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mnav_embed::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mnav-embed")]
#[command(about = "Embeds BTC price and MNAV series into a static chart page", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    //only print the result line, log warnings and errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Args, Default)]
struct InputArgs {
    //json file with path settings
    #[arg(long)]
    config: Option<PathBuf>,

    //price series csv
    #[arg(long)]
    prices: Option<PathBuf>,

    //valuation series csv
    #[arg(long)]
    valuations: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    //embed both series into the template in place (default)
    Embed {
        #[command(flatten)]
        inputs: InputArgs,

        //html template to rewrite
        #[arg(long)]
        template: Option<PathBuf>,
    },

    //write both series and fitted models to a standalone script
    DataJs {
        #[command(flatten)]
        inputs: InputArgs,

        //output script path
        #[arg(long)]
        output: Option<PathBuf>,
    },

    //write the effective configuration as json
    Config {
        #[command(flatten)]
        inputs: InputArgs,

        //where to write the configuration
        #[arg(long, default_value = "mnav-embed.json")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = if cli.quiet {
        LoggingConfig::from_env().quiet()
    } else {
        LoggingConfig::from_env()
    };
    init_logging(logging)?;

    let command = cli.command.unwrap_or(Commands::Embed {
        inputs: InputArgs::default(),
        template: None,
    });

    match command {
        Commands::Embed { inputs, template } => {
            let config = resolve_config(inputs, template, None)?;
            run_embed(config, cli.quiet)?;
        }
        Commands::DataJs { inputs, output } => {
            let config = resolve_config(inputs, None, output)?;
            run_data_js(config, cli.quiet)?;
        }
        Commands::Config { inputs, output } => {
            let config = resolve_config(inputs, None, None)?;
            config
                .to_json_file(&output)
                .context(format!("Failed to write configuration to {:?}", output))?;
            println!("Configuration written to {}", output.display());
        }
    }

    Ok(())
}

//defaults, then the json file, then per-path flags
fn resolve_config(
    inputs: InputArgs,
    template: Option<PathBuf>,
    data_js_output: Option<PathBuf>,
) -> Result<EmbedConfig> {
    let base = match &inputs.config {
        Some(path) => EmbedConfig::from_json_file(path)
            .context(format!("Failed to load configuration from {:?}", path))?,
        None => EmbedConfig::default(),
    };

    Ok(base.with_overrides(inputs.prices, inputs.valuations, template, data_js_output))
}

fn run_embed(config: EmbedConfig, quiet: bool) -> Result<()> {
    let template = config.template.clone();
    let engine = EmbedEngine::new(config);

    let result = engine
        .run()
        .context(format!("Failed to embed data into {}", template.display()))?;

    println!("Data embedded into {} successfully!", result.template.display());
    println!("The page now contains all data and no longer fetches it at runtime.");

    if !quiet {
        println!();
        pretty_print_table(&[result.prices, result.valuations]);
    }

    Ok(())
}

fn run_data_js(config: EmbedConfig, quiet: bool) -> Result<()> {
    let output = config.data_js_output.clone();

    let result = write_data_js(&config)
        .context(format!("Failed to write data module {}", output.display()))?;

    println!(
        "Wrote {} with {} BTC records and {} MNAV records",
        result.output.display(),
        result.prices.records,
        result.valuations.records
    );

    if !quiet {
        for (name, model) in [("BTC", result.btc_model), ("MNAV", result.mnav_model)] {
            if let Some(model) = model {
                println!(
                    "{} model: a={:.4} b={:.2} c={:.4}",
                    name, model.a, model.b, model.c
                );
            }
        }
        println!();
        pretty_print_table(&[result.prices, result.valuations]);
    }

    Ok(())
}
