//! Leaf classification of catalog types.

use std::fmt;

/// The closed set of leaf categories a catalog type can resolve to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LeafCategory {
    Boolean,
    Integer,
    Real,
    OctetString,
    Sequence,
    Set,
    Choice,
    SequenceOf,
    SetOf,
    Enumerated,
}

impl LeafCategory {
    /// Every category, in declaration order.
    pub const ALL: [LeafCategory; 10] = [
        LeafCategory::Boolean,
        LeafCategory::Integer,
        LeafCategory::Real,
        LeafCategory::OctetString,
        LeafCategory::Sequence,
        LeafCategory::Set,
        LeafCategory::Choice,
        LeafCategory::SequenceOf,
        LeafCategory::SetOf,
        LeafCategory::Enumerated,
    ];

    /// Parse the catalog service's spelling of a leaf type.
    ///
    /// Accepts both the compact (`SEQUENCEOF`) and the spaced (`SEQUENCE OF`)
    /// forms. Returns `None` for anything outside the closed set.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let category = match raw.trim() {
            "BOOLEAN" => LeafCategory::Boolean,
            "INTEGER" => LeafCategory::Integer,
            "REAL" => LeafCategory::Real,
            "OCTET STRING" | "OCTETSTRING" | "OCTET_STRING" => LeafCategory::OctetString,
            "SEQUENCE" => LeafCategory::Sequence,
            "SET" => LeafCategory::Set,
            "CHOICE" => LeafCategory::Choice,
            "SEQUENCEOF" | "SEQUENCE OF" | "SEQUENCE_OF" => LeafCategory::SequenceOf,
            "SETOF" | "SET OF" | "SET_OF" => LeafCategory::SetOf,
            "ENUMERATED" => LeafCategory::Enumerated,
            _ => return None,
        };
        Some(category)
    }

    /// Canonical spelling, as used in diagnostics and listings.
    pub fn as_str(self) -> &'static str {
        match self {
            LeafCategory::Boolean => "BOOLEAN",
            LeafCategory::Integer => "INTEGER",
            LeafCategory::Real => "REAL",
            LeafCategory::OctetString => "OCTET STRING",
            LeafCategory::Sequence => "SEQUENCE",
            LeafCategory::Set => "SET",
            LeafCategory::Choice => "CHOICE",
            LeafCategory::SequenceOf => "SEQUENCE OF",
            LeafCategory::SetOf => "SET OF",
            LeafCategory::Enumerated => "ENUMERATED",
        }
    }

    /// Scalar categories that need an explicit range constraint.
    pub fn requires_range(self) -> bool {
        matches!(self, LeafCategory::Integer | LeafCategory::Real)
    }
}

impl fmt::Display for LeafCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leaf type of a catalog entry as delivered by the catalog service.
///
/// Unclassified leaves are kept verbatim rather than rejected at load time:
/// an artificial or skipped entry may legitimately carry one, and the engine
/// only treats it as a contract violation when it would have to dispatch it.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum LeafType {
    Category(LeafCategory),
    Unclassified(String),
}

impl LeafType {
    /// Classify a raw leaf type string.
    pub fn parse(raw: &str) -> Self {
        match LeafCategory::from_raw(raw) {
            Some(category) => LeafType::Category(category),
            None => LeafType::Unclassified(raw.trim().to_string()),
        }
    }

    /// The closed category, if this leaf has one.
    pub fn category(&self) -> Option<LeafCategory> {
        match self {
            LeafType::Category(category) => Some(*category),
            LeafType::Unclassified(_) => None,
        }
    }

    /// Character-string leaves that may not be used as parameter types.
    pub fn is_character_string(&self) -> bool {
        match self {
            LeafType::Category(_) => false,
            LeafType::Unclassified(raw) => {
                matches!(raw.as_str(), "AsciiString" | "IA5String" | "VisibleString")
            }
        }
    }
}

impl fmt::Display for LeafType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeafType::Category(category) => category.fmt(f),
            LeafType::Unclassified(raw) => f.write_str(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compact_and_spaced_forms() {
        assert_eq!(LeafCategory::from_raw("SEQUENCEOF"), Some(LeafCategory::SequenceOf));
        assert_eq!(LeafCategory::from_raw("SEQUENCE OF"), Some(LeafCategory::SequenceOf));
        assert_eq!(LeafCategory::from_raw("SETOF"), Some(LeafCategory::SetOf));
        assert_eq!(LeafCategory::from_raw("OCTET STRING"), Some(LeafCategory::OctetString));
        assert_eq!(LeafCategory::from_raw(" INTEGER "), Some(LeafCategory::Integer));
    }

    #[test]
    fn canonical_spelling_parses_back() {
        for category in LeafCategory::ALL {
            assert_eq!(LeafCategory::from_raw(category.as_str()), Some(category));
        }
    }

    #[test]
    fn unknown_leaf_is_kept_verbatim() {
        let leaf = LeafType::parse("BIT STRING");
        assert_eq!(leaf, LeafType::Unclassified("BIT STRING".to_string()));
        assert_eq!(leaf.category(), None);
        assert_eq!(leaf.to_string(), "BIT STRING");
    }

    #[test]
    fn character_strings_are_flagged() {
        assert!(LeafType::parse("AsciiString").is_character_string());
        assert!(LeafType::parse("IA5String").is_character_string());
        assert!(!LeafType::parse("OCTET STRING").is_character_string());
        assert!(!LeafType::parse("NULL").is_character_string());
    }

    #[test]
    fn only_scalars_need_ranges() {
        let needing: Vec<_> = LeafCategory::ALL
            .into_iter()
            .filter(|c| c.requires_range())
            .collect();
        assert_eq!(needing, vec![LeafCategory::Integer, LeafCategory::Real]);
    }
}
