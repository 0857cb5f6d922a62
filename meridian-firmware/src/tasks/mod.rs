//! Embassy tasks

pub mod path_rx;
pub mod render;
pub mod scroll;
