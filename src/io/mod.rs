//! File I/O for screen block definitions.
//!
//! Screen blocks are described as JSON: the front panel, its orientation, the
//! openings it carries and optionally the evaluation settings.

pub mod screen_json;

pub use screen_json::{
    OpeningDefinition, ScreenDefinition, from_screen_string, read_screen_definition,
    to_screen_string, write_screen_definition,
};
