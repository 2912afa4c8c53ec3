use clap::Parser;
use log::{error, info};

use detconv::geometry::Resolution;
use detconv::{coco_names, convert, Args, ConvertOptions};

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !args.input.exists() {
        error!(
            "The specified input does not exist: {}",
            args.input.display()
        );
        std::process::exit(1);
    }

    let resolution = match (args.width, args.height) {
        (Some(width), Some(height)) => Some(Resolution::new(width, height)),
        _ => None,
    };

    let table = coco_names::coco_table();
    let options = ConvertOptions {
        resolution,
        class_filter: args.class_filter.iter().copied().collect(),
        table: &table,
    };

    info!(
        "Converting {} ({}) to {} ({})...",
        args.input.display(),
        args.input_format.token(),
        args.output.display(),
        args.output_format.token()
    );

    if let Err(e) = convert(
        &args.input,
        args.input_format,
        &args.output,
        args.output_format,
        &options,
    ) {
        error!("Conversion failed: {}", e);
        std::process::exit(1);
    }
}
