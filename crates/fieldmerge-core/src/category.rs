//! Field presence classification
//!
//! Categories are combined with an ordered list of [`Toggle`]s. Each toggle
//! unions its category into the running result (`include`) or subtracts it
//! (`exclude`), strictly left to right:
//!
//! - `[exclude(Identity), include(All)]` yields every field
//! - `[include(All), exclude(Identity)]` yields every non-identity field
//! - `[]` yields nothing
//!
//! `Unset`, `DefaultValued` and `NullValued` overlap with each other and with
//! the structural categories, so toggle order decides the outcome.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::{FieldKind, FieldView, ReconcileError};

/// Field category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Every declared field
    All,
    /// Unique key fields
    Identity,
    /// Fields pointing at another record's identity
    Reference,
    /// All minus identity minus reference
    Standard,
    /// Assigned to a meaningful value: equivalent to
    /// `[All, !Unset, !DefaultValued, !NullValued]`
    Assigned,
    /// Never assigned
    Unset,
    /// Holding the default value
    DefaultValued,
    /// Holding `Value::Null`
    NullValued,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::All,
        Category::Identity,
        Category::Reference,
        Category::Standard,
        Category::Assigned,
        Category::Unset,
        Category::DefaultValued,
        Category::NullValued,
    ];

    /// Check membership of a single field
    pub fn contains(self, field: &FieldView<'_>) -> bool {
        match self {
            Category::All => true,
            Category::Identity => field.kind == FieldKind::Identity,
            Category::Reference => field.kind == FieldKind::Reference,
            Category::Standard => field.kind == FieldKind::Standard,
            Category::Assigned => field.is_explicit(),
            Category::Unset => field.presence.is_unset(),
            Category::DefaultValued => field.presence.default,
            Category::NullValued => field.value.is_null(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Identity => "pk",
            Category::Reference => "fk",
            Category::Standard => "standard",
            Category::Assigned => "assigned",
            Category::Unset => "unset",
            Category::DefaultValued => "defaults",
            Category::NullValued => "none",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ReconcileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Category::All),
            "pk" | "identity" => Ok(Category::Identity),
            "fk" | "reference" => Ok(Category::Reference),
            "standard" => Ok(Category::Standard),
            "assigned" => Ok(Category::Assigned),
            "unset" => Ok(Category::Unset),
            "defaults" | "default" => Ok(Category::DefaultValued),
            "none" | "null" => Ok(Category::NullValued),
            other => Err(ReconcileError::InvalidCategory(other.to_string())),
        }
    }
}

/// Include or exclude one category
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Toggle {
    pub category: Category,
    pub include: bool,
}

impl Toggle {
    #[inline]
    pub fn include(category: Category) -> Self {
        Toggle {
            category,
            include: true,
        }
    }

    #[inline]
    pub fn exclude(category: Category) -> Self {
        Toggle {
            category,
            include: false,
        }
    }

    /// Parse `(name, include)` pairs, failing on the first unknown name
    pub fn parse_all<'a, I>(pairs: I) -> Result<Vec<Toggle>, ReconcileError>
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        pairs
            .into_iter()
            .map(|(name, include)| {
                name.parse().map(|category| Toggle { category, include })
            })
            .collect()
    }
}

/// Fold toggles over the fields, returning matching names in declaration order
pub fn classify(fields: &[FieldView<'_>], toggles: &[Toggle]) -> Vec<String> {
    let mut selected: HashSet<&str> = HashSet::new();

    for toggle in toggles {
        let members = fields.iter().filter(|f| toggle.category.contains(f));
        if toggle.include {
            selected.extend(members.map(|f| f.name));
        } else {
            for field in members {
                selected.remove(field.name);
            }
        }
    }

    fields
        .iter()
        .filter(|f| selected.contains(f.name))
        .map(|f| f.name.to_string())
        .collect()
}
