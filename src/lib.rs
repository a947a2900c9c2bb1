//! tidywin: delete cached and temporary files with optional secure
//! overwrite or backup-before-delete disposal.

pub mod backup;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod report;
pub mod shredder;
pub mod utils;
