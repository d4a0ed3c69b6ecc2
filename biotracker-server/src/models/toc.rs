//! Table-of-contents item kinds

use std::fmt;

/// The three TOC indexes, stored in `toc_items.type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TocKind {
    Table,
    Figure,
    Listing,
}

impl TocKind {
    pub const ALL: [TocKind; 3] = [TocKind::Table, TocKind::Figure, TocKind::Listing];

    /// Value of the `type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Figure => "figure",
            Self::Listing => "listing",
        }
    }

    /// Route segment under `/toc`.
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Table => "tables",
            Self::Figure => "figures",
            Self::Listing => "listings",
        }
    }
}

impl fmt::Display for TocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        let plurals: Vec<_> = TocKind::ALL.iter().map(TocKind::plural).collect();
        assert_eq!(plurals, ["tables", "figures", "listings"]);
        assert_eq!(TocKind::Figure.to_string(), "figure");
    }
}
