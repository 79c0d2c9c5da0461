//! CLI Commands
//!
//! Handlers behind the `crimeboard` subcommands. Each handler returns plain
//! data; printing is left to the binary.

pub mod analyze;
pub mod composite;
pub mod extract;
pub mod layout;
pub mod settings;
pub mod tag;

pub use analyze::{analyze_case_input, CaseEvidence, CaseInput};
pub use composite::{composite_for_suspect, load_analysis};
pub use extract::{extract_file, ExtractedFile};
pub use layout::{layout_nodes, LayoutInput};
pub use settings::{init_settings, show_settings, SettingsView};
pub use tag::{tag_files, TaggedFile};
