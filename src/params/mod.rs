//! Parameter-file rendering from YAML testbeds
//!
//! A testbed YAML document describes the values a deployment needs; a
//! parameter template carries `[identifier]` placeholders, at most one
//! per line. Rendering looks each identifier up in the selected testbed
//! section and substitutes the quoted value.

pub mod render;
pub mod testbed;

pub use render::render_parameter_file;
pub use testbed::{DEFAULT_TESTBED_SECTION, load_testbed};
