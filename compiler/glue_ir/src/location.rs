use std::fmt;

/// Where a catalog type was declared.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        SourceLocation {
            file: file.into(),
            line,
        }
    }

    /// Location with no line information (line 0).
    pub fn file_only(file: impl Into<String>) -> Self {
        Self::new(file, 0)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.file)
        } else {
            write!(f, "{}:{}", self.file, self.line)
        }
    }
}
