//! Data models for Easter messages.

pub mod message;
pub mod samples;

pub use message::{decorate, MessageSource, BUNNY, CHICK};
pub use samples::{random_sample_index, sample, samples};
