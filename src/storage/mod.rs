//! File system storage operations
//!
//! This module handles all project tree I/O:
//! - YAML file reading/writing
//! - Writing planned category trees (export)
//! - Collecting category folders and reassembling pages (import)

mod aggregator;
mod collector;
mod pages;
mod tree_writer;
mod yaml;

pub use aggregator::{ImportAggregator, ProjectSnapshot};
pub use collector::collect_folder;
pub use pages::{reassemble_page, reassemble_pages};
pub use tree_writer::TreeWriter;
pub use yaml::{is_yaml_file, read_yaml_file, to_sorted_yaml, write_yaml_file};
