pub mod bracket;
pub mod ranking;
pub mod scoring;
pub mod standings;
