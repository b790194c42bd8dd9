use std::path::PathBuf;

use anyhow::Context;
use structopt::StructOpt;
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(StructOpt)]
#[structopt(name = "dump-humen", about = "Prints the note timestamps of a humen.")]
struct Opt {
    /// Path to a humen file.
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let opt = Opt::from_args();
    let chart = hayashi_humen::from_path(&opt.path)
        .with_context(|| format!("error loading {:?}", opt.path))?;

    println!("bpm\t{}", chart.metadata.bpm);
    println!("offset\t{}", chart.metadata.offset.as_secs());
    for (i, lane) in chart.lanes.iter().enumerate() {
        for timestamp in &lane.timestamps {
            println!("{}\t{}", i, timestamp.as_secs());
        }
    }

    Ok(())
}
