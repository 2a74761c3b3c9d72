use clap::Parser;
use log::info;
use std::path::PathBuf;

use photocure::config::{Config, ParameterEvent};
use photocure::report::Report;
use photocure::session::Session;

/// Light attenuation through a single absorber, with initiator half-lives and unit
/// conversions.
#[derive(Parser, Debug)]
#[command(name = "photocure", version, about)]
struct Args {
    /// JSON file with samples, significant_figures and scripted parameter events
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Commit a parameter value, applied after the config events (repeatable)
    #[arg(short, long = "set", value_name = "FIELD=VALUE", value_parser = ParameterEvent::from_assignment)]
    set: Vec<ParameterEvent>,

    /// Number of curve intervals across the depth range
    #[arg(long)]
    samples: Option<usize>,

    /// Significant figures for displayed values
    #[arg(long)]
    sig_figs: Option<usize>,

    /// Include the sampled intensity curve
    #[arg(long)]
    curve: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            Config::from_file(path)?
        }
        None => Config::default(),
    };

    if let Some(samples) = args.samples {
        config.set_samples(samples)?;
    }
    if let Some(sig) = args.sig_figs {
        config.set_significant_figures(sig)?;
    }
    for event in args.set {
        config.push_event(event);
    }

    let mut session = Session::new(config.samples());
    let mut rejected = 0;
    for event in config.events() {
        let outcome = session.on_parameter_change(event.field, &event.raw, event.mode);
        if outcome.error.is_some() {
            rejected += 1;
        }
    }
    info!(
        "Replayed {} parameter events ({} rejected)",
        config.events().len(),
        rejected
    );

    let outputs = session.outputs();
    let mut report =
        Report::from_outputs(&session.snapshot(), outputs, config.significant_figures());
    if args.curve {
        report = report.with_curve(&outputs.curve);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }

    Ok(())
}
