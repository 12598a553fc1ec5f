//! Builds ffmpeg command lines without running them.
//!
//! Options are only callable where they are meaningful: input options sit on
//! [`ReadStage`] and land before their `-i`, output options sit on
//! [`WriteStage`] and land after every input.
//!
//! `new().overwrite().input("movie.mkv").t(30s).output("out.mkv").build()`
//! yields `ffmpeg -y -t 00:00:30.000 -i movie.mkv out.mkv`.
mod command;
mod duration;
mod error;
pub mod filter;

pub use command::{
    FilterStage, GlobalStage, LogLevel, ReadStage, StreamType, WriteStage, new, with_program,
};
pub use duration::{format_duration, format_seconds, parse_timestamp};
pub use error::{Error, Result};
pub use filter::{AtomicFilter, Chain, Filter, FilterNode, Pipeline};
