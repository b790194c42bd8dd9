use std::path::PathBuf;

use anyhow::{anyhow, ensure, Context};
use hayashi_core::{timing::TimestampDifference, track::LaneTrack};
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

mod config;
use config::Config;

mod player;
use player::Autoplayer;

mod session;

#[derive(StructOpt)]
#[structopt(name = "autoplay", about = "Plays a humen with synthetic input.")]
struct Opt {
    /// Path to a humen file.
    path: PathBuf,

    /// Path to a YAML config.
    #[structopt(long, short)]
    config: Option<PathBuf>,

    /// Don't press anything, letting every note expire.
    #[structopt(long)]
    miss_all: bool,

    /// Seconds between the perfect time of a note and its press, negative for early presses.
    #[structopt(long, default_value = "0", allow_hyphen_values = true)]
    accuracy: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let opt = Opt::from_args();
    ensure!(
        opt.accuracy.is_finite(),
        "accuracy must be finite, got {}",
        opt.accuracy
    );

    let chart = hayashi_humen::from_path(&opt.path)
        .with_context(|| format!("error loading {:?}", opt.path))?;
    let config = match &opt.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let bindings = config.bindings(chart.lane_count())?;
    let mut track = LaneTrack::new(&chart, &bindings, config.settings())
        .map_err(|err| anyhow!("error creating the lane track: {err}"))?;

    let player = (!opt.miss_all)
        .then(|| Autoplayer::new(&track, TimestampDifference::from_secs(opt.accuracy)));

    info!(
        lanes = track.lane_count(),
        notes = track.live_note_count(),
        "starting autoplay"
    );

    let summary = session::run(
        &mut track,
        player,
        config.frame_rate,
        TimestampDifference::from_secs(config.approach_time),
    );
    info!(frames = summary.frames, "finished autoplay");

    println!("hit\t{}", summary.hit);
    println!("expired\t{}", summary.expired);
    println!("remaining\t{}", summary.remaining);
    if let Some(error) = summary.mean_error() {
        println!("mean error\t{:.1} ms", error * 1000.);
    }
    println!("peak drawn\t{}", summary.peak_drawn);

    Ok(())
}
