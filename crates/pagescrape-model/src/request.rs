use std::fmt;

/// How elements are picked out of the fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Every element with this tag name (e.g., "h2").
    Tag(String),
    /// Every element carrying this token in its `class` attribute.
    Class(String),
    /// The first element whose `id` attribute equals this value.
    Id(String),
}

impl Selector {
    pub fn value(&self) -> &str {
        match self {
            Selector::Tag(v) | Selector::Class(v) | Selector::Id(v) => v,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Selector::Tag(_) => "tag",
            Selector::Class(_) => "class",
            Selector::Id(_) => "id",
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.kind(), self.value())
    }
}

/// One scrape: which page, and what to take from it.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub url: String,
    pub selector: Selector,
}

/// The artifact formats a run can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Excel,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Excel => "xlsx",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv",
            OutputFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// File name for the artifact. Merged output and fresh scrapes are
    /// named differently so one never overwrites the other.
    pub fn file_name(self, merged: bool) -> String {
        let stem = if merged { "merged_output" } else { "scraped_data" };
        format!("{stem}.{}", self.extension())
    }
}

/// A user-supplied file, as raw bytes plus the name it was given.
#[derive(Debug, Clone)]
pub struct Upload {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// A serialized table ready to be written out.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}
