//! Cell types and alignment for the abstract table

/// Cell alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl CellAlign {
    /// Convert to LaTeX column specification character
    pub fn to_char(&self) -> char {
        match self {
            CellAlign::Left => 'l',
            CellAlign::Center => 'c',
            CellAlign::Right => 'r',
        }
    }
}

/// A run of cell content.
///
/// Serializers pick the markup for each kind, so the same cell renders as
/// `<sup>**</sup>` in HTML and `$^{**}$` in LaTeX.
#[derive(Debug, Clone, PartialEq)]
pub enum Span {
    Text(String),
    Italic(String),
    Superscript(String),
    /// The `<` comparison symbol
    LessThan,
}

/// A single table cell with span and alignment info
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub content: Vec<Span>,
    /// Number of columns this cell spans
    pub colspan: usize,
    /// Explicit alignment; `None` keeps the column default
    pub align: Option<CellAlign>,
}

impl TableCell {
    /// Create a cell holding plain text
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let content = if text.is_empty() {
            Vec::new()
        } else {
            vec![Span::Text(text)]
        };
        TableCell {
            content,
            colspan: 1,
            align: None,
        }
    }

    pub fn empty() -> Self {
        TableCell {
            content: Vec::new(),
            colspan: 1,
            align: None,
        }
    }

    /// Create a cell from content runs
    pub fn from_spans(content: Vec<Span>) -> Self {
        TableCell {
            content,
            colspan: 1,
            align: None,
        }
    }

    /// Builder: span several columns
    pub fn spanning(mut self, colspan: usize) -> Self {
        self.colspan = colspan.max(1);
        self
    }

    /// Builder: set alignment
    pub fn aligned(mut self, align: CellAlign) -> Self {
        self.align = Some(align);
        self
    }

    /// Append a content run
    pub fn push(&mut self, span: Span) {
        self.content.push(span);
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Content with markup stripped, e.g. for comparisons in tests
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|span| match span {
                Span::Text(t) | Span::Italic(t) | Span::Superscript(t) => t.as_str(),
                Span::LessThan => "<",
            })
            .collect()
    }
}
