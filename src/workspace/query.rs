//! Equality filters for table scans.
//!
//! A [`Where`] clause is rendered to SQL for database backends and evaluated
//! directly against scanned values by the in-memory backend.

use std::fmt;

/// `<column> = '<value>'` predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Where {
    column: String,
    value: String,
}

impl Where {
    /// Starts a clause on `column`
    ///
    /// ```
    /// use gntools::workspace::Where;
    ///
    /// let filter = Where::field("RELATIONTYPE").equals("relate");
    /// assert_eq!(filter.to_sql(), "RELATIONTYPE = 'relate'");
    /// ```
    pub fn field(column: impl Into<String>) -> WhereField {
        WhereField {
            column: column.into(),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// SQL text with the literal single-quote escaped
    pub fn to_sql(&self) -> String {
        format!("{} = '{}'", self.column, self.value.replace('\'', "''"))
    }

    /// NULL never equals anything, as in SQL
    pub fn matches(&self, value: Option<&str>) -> bool {
        value == Some(self.value.as_str())
    }
}

impl fmt::Display for Where {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Column half of a [`Where`] clause under construction
#[derive(Debug, Clone)]
pub struct WhereField {
    column: String,
}

impl WhereField {
    pub fn equals(self, value: impl Into<String>) -> Where {
        Where {
            column: self.column,
            value: value.into(),
        }
    }
}
