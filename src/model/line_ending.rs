//! Line endings appended to transmitted lines.

use serde::Deserialize;

/// Terminator appended to each sent line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\r\n`
    #[default]
    Crlf,
    /// `\n`
    Lf,
    /// `\r`
    Cr,
    /// Nothing appended.
    None,
}

impl LineEnding {
    /// Bytes appended to a sent line.
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Crlf => "\r\n",
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
            LineEnding::None => "",
        }
    }

    /// Fixed-width label for the send bar.
    pub fn label(self) -> &'static str {
        match self {
            LineEnding::Crlf => "CRLF",
            LineEnding::Lf => "  LF",
            LineEnding::Cr => "  CR",
            LineEnding::None => "NONE",
        }
    }

    /// Next ending in the cycle CRLF → LF → CR → NONE → CRLF.
    pub fn next(self) -> Self {
        match self {
            LineEnding::Crlf => LineEnding::Lf,
            LineEnding::Lf => LineEnding::Cr,
            LineEnding::Cr => LineEnding::None,
            LineEnding::None => LineEnding::Crlf,
        }
    }
}
