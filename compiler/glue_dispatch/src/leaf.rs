//! Leaf classification: which backend hook a catalog type reaches.

use glue_ir::{LeafCategory, LeafType, TypeNode};

use crate::{
    AsyncBackend, BackendResult, CatalogLeaf, DispatchError, SyncBackend, UnitLeaf,
};

/// The backend hook a leaf category dispatches to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LeafOperation {
    Basic,
    Sequence,
    Set,
    Choice,
    SequenceOf,
    SetOf,
    Enumerated,
}

impl LeafOperation {
    /// Total over [`LeafCategory`]; adding a category is a compile error
    /// here until it is given a hook.
    pub fn classify(category: LeafCategory) -> Self {
        match category {
            LeafCategory::Boolean
            | LeafCategory::Integer
            | LeafCategory::Real
            | LeafCategory::OctetString => LeafOperation::Basic,
            LeafCategory::Sequence => LeafOperation::Sequence,
            LeafCategory::Set => LeafOperation::Set,
            LeafCategory::Choice => LeafOperation::Choice,
            LeafCategory::SequenceOf => LeafOperation::SequenceOf,
            LeafCategory::SetOf => LeafOperation::SetOf,
            LeafCategory::Enumerated => LeafOperation::Enumerated,
        }
    }

    /// Classify a node about to be dispatched.
    ///
    /// An unclassified leaf that reaches dispatch is a catalog contract
    /// violation and aborts the run.
    pub fn resolve(node: &TypeNode) -> Result<Self, DispatchError> {
        match &node.leaf {
            LeafType::Category(category) => Ok(Self::classify(*category)),
            LeafType::Unclassified(raw) => Err(DispatchError::UnclassifiedLeaf {
                type_name: node.name.clone(),
                leaf: raw.clone(),
                location: node.location.clone(),
            }),
        }
    }

    pub fn hook_name(self) -> &'static str {
        match self {
            LeafOperation::Basic => "basic",
            LeafOperation::Sequence => "sequence",
            LeafOperation::Set => "set",
            LeafOperation::Choice => "choice",
            LeafOperation::SequenceOf => "sequence_of",
            LeafOperation::SetOf => "set_of",
            LeafOperation::Enumerated => "enumerated",
        }
    }

    pub(crate) fn invoke_sync(
        self,
        backend: &mut dyn SyncBackend,
        leaf: &UnitLeaf<'_>,
    ) -> BackendResult {
        match self {
            LeafOperation::Basic => backend.on_basic(leaf),
            LeafOperation::Sequence => backend.on_sequence(leaf),
            LeafOperation::Set => backend.on_set(leaf),
            LeafOperation::Choice => backend.on_choice(leaf),
            LeafOperation::SequenceOf => backend.on_sequence_of(leaf),
            LeafOperation::SetOf => backend.on_set_of(leaf),
            LeafOperation::Enumerated => backend.on_enumerated(leaf),
        }
    }

    pub(crate) fn invoke_async(
        self,
        backend: &mut dyn AsyncBackend,
        leaf: &CatalogLeaf<'_>,
    ) -> BackendResult {
        match self {
            LeafOperation::Basic => backend.on_basic(leaf),
            LeafOperation::Sequence => backend.on_sequence(leaf),
            LeafOperation::Set => backend.on_set(leaf),
            LeafOperation::Choice => backend.on_choice(leaf),
            LeafOperation::SequenceOf => backend.on_sequence_of(leaf),
            LeafOperation::SetOf => backend.on_set_of(leaf),
            LeafOperation::Enumerated => backend.on_enumerated(leaf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glue_ir::{CatalogSourceId, SourceLocation};
    use pretty_assertions::assert_eq;

    #[test]
    fn scalars_and_octet_strings_are_basic() {
        let basic: Vec<_> = LeafCategory::ALL
            .into_iter()
            .filter(|c| LeafOperation::classify(*c) == LeafOperation::Basic)
            .collect();
        assert_eq!(
            basic,
            vec![
                LeafCategory::Boolean,
                LeafCategory::Integer,
                LeafCategory::Real,
                LeafCategory::OctetString,
            ]
        );
    }

    #[test]
    fn constructed_categories_have_their_own_hook() {
        let hooks: Vec<_> = [
            LeafCategory::Sequence,
            LeafCategory::Set,
            LeafCategory::Choice,
            LeafCategory::SequenceOf,
            LeafCategory::SetOf,
            LeafCategory::Enumerated,
        ]
        .into_iter()
        .map(|c| LeafOperation::classify(c).hook_name())
        .collect();
        assert_eq!(
            hooks,
            vec!["sequence", "set", "choice", "sequence_of", "set_of", "enumerated"]
        );
    }

    #[test]
    fn unclassified_leaf_is_fatal_with_location() {
        let node = TypeNode::new(
            "T-Bits",
            LeafType::parse("BIT STRING"),
            CatalogSourceId::new("a.asn"),
        )
        .with_location(SourceLocation::new("a.asn", 9));
        match LeafOperation::resolve(&node) {
            Err(DispatchError::UnclassifiedLeaf { leaf, location, .. }) => {
                assert_eq!(leaf, "BIT STRING");
                assert_eq!(location, SourceLocation::new("a.asn", 9));
            }
            other => panic!("expected unclassified leaf error, got {other:?}"),
        }
    }
}
