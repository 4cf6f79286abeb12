//! CLI logic for the Flywheel document inspector.
//!
//! The inspector loads a state-machine document through the model layer and
//! prints the resulting item tree, which makes it a convenient end-to-end
//! check of the whole load path: parser seam, conversion, and adapter.

mod args;

pub use args::Args;

use std::path::Path;

use log::info;

use flywheel::{ModelError, TreeModel, document::JsonDocumentSource};

/// Run the Flywheel inspector
///
/// Loads the input document into a fresh model and prints the machine
/// header plus the indented item outline to stdout.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ModelError` for:
/// - File I/O errors
/// - Malformed documents
/// - Unresolvable transition endpoints
pub fn run(args: &Args) -> Result<(), ModelError> {
    info!(input_path = args.input; "Inspecting state-machine document");

    let mut model = TreeModel::new();
    model.load_document(&JsonDocumentSource, Path::new(&args.input))?;

    if !model.format_version().is_empty() {
        println!("format version: {}", model.format_version());
    }
    println!("machine: {}", model.machine_name());
    print!("{}", model.outline(args.show_ids));

    Ok(())
}
