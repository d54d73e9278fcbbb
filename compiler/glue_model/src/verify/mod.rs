//! Checks run on a loaded model before any unit is dispatched.

use glue_ir::{CatalogSourceId, GenerationUnit, LeafCategory, TypeCatalog};

use crate::{LoadError, LoadedModel, RangeLimit};

/// Run every pre-dispatch check, stopping at the first failure.
pub fn verify(model: &LoadedModel) -> Result<(), LoadError> {
    check_parameter_types(&model.units, &model.catalog)?;
    verify_ranges(&model.units, &model.catalog)
}

/// Every parameter type must resolve in the catalog and must not be a
/// character string.
///
/// A type in the skip-set may be absent from the catalog; nothing will ever
/// look it up.
pub fn check_parameter_types(
    units: &[GenerationUnit],
    catalog: &TypeCatalog,
) -> Result<(), LoadError> {
    for unit in units {
        for param in unit.params() {
            let Some(node) = catalog.lookup(param.type_name()) else {
                if catalog.is_skipped(param.type_name()) {
                    continue;
                }
                return Err(LoadError::UnknownType {
                    unit: unit.to_string(),
                    parameter: param.id.clone(),
                    type_name: param.type_name().to_string(),
                });
            };
            if node.leaf.is_character_string() {
                return Err(LoadError::DisallowedType {
                    unit: unit.to_string(),
                    parameter: param.id.clone(),
                    type_name: node.name.clone(),
                    leaf: node.leaf.to_string(),
                    location: node.location.clone(),
                });
            }
        }
    }
    Ok(())
}

/// INTEGER and REAL types need a range constraint; REAL limits must be
/// finite.
///
/// Applies to every type of every catalog source that some parameter
/// references, not only to the parameter types themselves.
pub fn verify_ranges(units: &[GenerationUnit], catalog: &TypeCatalog) -> Result<(), LoadError> {
    for source in sources_in_use(units) {
        for node in catalog.types_of(source) {
            let Some(category) = node.leaf.category() else {
                continue;
            };
            if !category.requires_range() {
                continue;
            }
            let Some(range) = node.range else {
                return Err(LoadError::MissingRange {
                    type_name: node.name.clone(),
                    category,
                    location: node.location.clone(),
                });
            };
            if category == LeafCategory::Real {
                let limit = if range.low.is_finite() {
                    (!range.high.is_finite()).then_some(RangeLimit::High)
                } else {
                    Some(RangeLimit::Low)
                };
                if let Some(limit) = limit {
                    return Err(LoadError::UnboundedReal {
                        type_name: node.name.clone(),
                        limit,
                        location: node.location.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Catalog sources referenced by parameters, in first-seen order.
fn sources_in_use(units: &[GenerationUnit]) -> Vec<&CatalogSourceId> {
    let mut sources: Vec<&CatalogSourceId> = Vec::new();
    for param in units.iter().flat_map(GenerationUnit::params) {
        if !sources.contains(&&param.signal.source) {
            sources.push(&param.signal.source);
        }
    }
    sources
}

#[cfg(test)]
mod tests;
