//! Helper functions shared by inspectors, hooks and the CLI

mod files;
mod html;
pub mod process;

pub use files::{html_files, write_if_changed};
pub use html::*;
pub use process::{decode_output, encoding_for_label, ExternalCommand};
