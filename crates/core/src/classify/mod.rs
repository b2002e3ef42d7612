//! Classification of HDL inputs by file-name suffix.

use serde::{Deserialize, Serialize};

use crate::error::{GenError, GenResult};

pub const SYSTEM_VERILOG_EXTENSION: &str = ".sv";
pub const VERILOG_EXTENSION: &str = ".v";
pub const VHDL_EXTENSIONS: [&str; 2] = [".vhd", ".vhdl"];

/// The language bucket a source file is compiled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    SystemVerilog,
    Verilog,
    Vhdl,
    Other,
}

impl FileCategory {
    /// Classify a file name. Checks run in a fixed order and the first match
    /// wins, so every name maps to exactly one category.
    pub fn of(name: &str) -> Self {
        if name.ends_with(SYSTEM_VERILOG_EXTENSION) {
            FileCategory::SystemVerilog
        } else if name.ends_with(VERILOG_EXTENSION) {
            FileCategory::Verilog
        } else if VHDL_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
            FileCategory::Vhdl
        } else {
            FileCategory::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::SystemVerilog => "systemverilog",
            FileCategory::Verilog => "verilog",
            FileCategory::Vhdl => "vhdl",
            FileCategory::Other => "other",
        }
    }
}

/// A source file plus the library it is compiled into, if any.
///
/// With no library the file lands in whatever library is current in the
/// project (usually `work`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SourceEntry {
    pub name: String,
    pub library: Option<String>,
}

impl SourceEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), library: None }
    }

    /// An empty library string is treated as "no library".
    pub fn with_library(name: impl Into<String>, library: impl Into<String>) -> Self {
        let library = library.into();
        Self { name: name.into(), library: (!library.is_empty()).then_some(library) }
    }

    pub fn category(&self) -> FileCategory {
        FileCategory::of(&self.name)
    }
}

/// Per-category ordered lists of classified sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedSources {
    pub system_verilog: Vec<SourceEntry>,
    pub verilog: Vec<SourceEntry>,
    pub vhdl: Vec<SourceEntry>,
    pub other: Vec<SourceEntry>,
}

impl ClassifiedSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry` to the one list its suffix selects.
    pub fn push(&mut self, entry: SourceEntry) -> GenResult<FileCategory> {
        if entry.name.is_empty() {
            let entry = match &entry.library {
                Some(lib) => format!("{lib}="),
                None => String::new(),
            };
            return Err(GenError::EmptyFileName { entry });
        }
        let category = entry.category();
        log::debug!("{} classified as {}", entry.name, category.as_str());
        self.list_mut(category).push(entry);
        Ok(category)
    }

    pub fn list(&self, category: FileCategory) -> &[SourceEntry] {
        match category {
            FileCategory::SystemVerilog => &self.system_verilog,
            FileCategory::Verilog => &self.verilog,
            FileCategory::Vhdl => &self.vhdl,
            FileCategory::Other => &self.other,
        }
    }

    fn list_mut(&mut self, category: FileCategory) -> &mut Vec<SourceEntry> {
        match category {
            FileCategory::SystemVerilog => &mut self.system_verilog,
            FileCategory::Verilog => &mut self.verilog,
            FileCategory::Vhdl => &mut self.vhdl,
            FileCategory::Other => &mut self.other,
        }
    }

    pub fn len(&self) -> usize {
        self.system_verilog.len() + self.verilog.len() + self.vhdl.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
