//! Command implementations.

pub mod export;
pub mod parse;
pub mod profile;
pub mod summarize;
pub mod view;

pub use self::export::execute_export;
pub use self::parse::execute_parse;
pub use self::profile::execute_profile;
pub use self::summarize::execute_summarize;
pub use self::view::execute_view;

use crate::error::Result;
use std::io::Read;
use std::path::Path;

/// Read a text input; `-` means stdin.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}
