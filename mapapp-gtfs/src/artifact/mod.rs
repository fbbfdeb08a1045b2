pub mod app;
mod artifact_error;
mod artifact_kind;
mod artifact_writer;
mod feed_reader;
mod feed_row;
mod feed_source;
mod malformed_row_policy;
mod pipeline;
mod pipeline_config;
mod pipeline_summary;
mod route_geometry;
mod schedule_time;
mod stop_info;
mod stop_schedule;
mod trip_headsign;
mod trip_index;
mod trip_time_range;
mod unmatched_trip_policy;

#[cfg(test)]
pub(crate) mod test_utils;

pub use artifact_error::ArtifactError;
pub use artifact_kind::Artifact;
pub use artifact_writer::ArtifactWriter;
pub use feed_reader::FeedReader;
pub use feed_row::{FeedRow, ShapeRow, StopRow, StopTimeRow, TripRow};
pub use feed_source::{FeedSource, FeedTable};
pub use malformed_row_policy::MalformedRowPolicy;
pub use pipeline::{preview_stop, run};
pub use pipeline_config::{OutputFilenames, PipelineConfig};
pub use pipeline_summary::PipelineSummary;
pub use route_geometry::{RouteGeometry, RouteGeometryBuilder};
pub use schedule_time::ScheduleTime;
pub use stop_info::{build_stop_info, StopInfo};
pub use stop_schedule::{ScheduleEntry, StopScheduleBuilder, StopSchedules};
pub use trip_headsign::build_trip_headsigns;
pub use trip_index::{TripIndex, TripInfo};
pub use trip_time_range::{TripTimeAccumulator, TripTimeRange, TripTimes};
pub use unmatched_trip_policy::UnmatchedTripPolicy;
