//! Horizontal rule types for the abstract table

/// Style of horizontal rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleStyle {
    /// Double rule opening the table
    Top,
    /// Single rule between sections
    #[default]
    Mid,
    /// Double rule closing the statistics block
    Bottom,
}

/// A horizontal rule between rows
#[derive(Debug, Clone, PartialEq)]
pub struct TableRule {
    /// Start column (0-indexed, None = from beginning)
    pub start: Option<usize>,
    /// End column (0-indexed exclusive, None = to end)
    pub end: Option<usize>,
    pub style: RuleStyle,
}

impl TableRule {
    /// Create a full-width rule
    pub fn full(style: RuleStyle) -> Self {
        TableRule {
            start: None,
            end: None,
            style,
        }
    }

    /// Create a partial rule under columns `start..end`
    pub fn partial(start: usize, end: usize) -> Self {
        TableRule {
            start: Some(start),
            end: Some(end),
            style: RuleStyle::Mid,
        }
    }

    pub fn top() -> Self {
        Self::full(RuleStyle::Top)
    }

    pub fn mid() -> Self {
        Self::full(RuleStyle::Mid)
    }

    pub fn bottom() -> Self {
        Self::full(RuleStyle::Bottom)
    }

    pub fn is_partial(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Resolve the covered column range against the table width
    pub fn columns(&self, col_count: usize) -> (usize, usize) {
        let start = self.start.unwrap_or(0).min(col_count);
        let end = self.end.unwrap_or(col_count).clamp(start, col_count);
        (start, end)
    }
}
