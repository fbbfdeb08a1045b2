//! builds the per-stop schedules, trip time ranges, route geometry, stop
//! info and trip headsign lookups from a GTFS feed.
use clap::Parser;
use mapapp_gtfs::artifact::app::ArtifactApp;

fn main() {
    env_logger::init();
    let args = ArtifactApp::parse();
    if let Err(e) = args.run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
