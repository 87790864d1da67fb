use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use shortstat::pipeline::print_batch_results;
use shortstat::{discover_inputs, init_default_config, load_settings, utils, Args, Pipeline};

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);

    if args.init {
        return init_default_config();
    }

    utils::validate_args(&args)?;

    let settings = load_settings(args.config.as_deref())?.with_args(&args);
    info!(action = "start", component = "main", input = ?settings.input, output_dir = ?settings.output_dir, "Starting");

    let inputs = discover_inputs(&settings.input)?;
    if inputs.is_empty() {
        println!("No HTML documents found in {}", settings.input.display());
        return Ok(());
    }

    let pipeline = Pipeline::new(settings)?;
    let summary = pipeline.run_batch(&inputs);
    print_batch_results(&summary);

    if summary.has_failures() {
        error!(
            action = "complete",
            component = "main",
            failed = summary.failed.len(),
            "Some documents could not be processed"
        );
        std::process::exit(1);
    }

    Ok(())
}
