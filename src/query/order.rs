//! Sort keys.

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    /// Fixed textual token, including its surrounding spaces.
    pub fn token(&self) -> &'static str {
        match self {
            SortDir::Asc => " ASC ",
            SortDir::Desc => " DESC ",
        }
    }
}

/// A single sort key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderSpec {
    column: String,
    direction: SortDir,
}

impl OrderSpec {
    /// Returns `None` when the column is absent.
    pub fn order_by(direction: SortDir, column: Option<&str>) -> Option<Self> {
        column.map(|column| Self {
            column: column.to_string(),
            direction,
        })
    }

    pub fn asc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            direction: SortDir::Asc,
        }
    }

    pub fn desc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            direction: SortDir::Desc,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn direction(&self) -> SortDir {
        self.direction
    }
}
