//! Document parsing and conversion into canonical units and catalog.

use std::path::Path;

use glue_ir::{
    CatalogSourceId, ContainerKind, Direction, GenerationUnit, LeafType, Parameter,
    SourceLocation, TargetLanguage, TypeCatalog, TypeNode, TypedSignal, ValueRange,
};
use tracing::debug;

use crate::schema::{CatalogDoc, DirectionDoc, KindDoc, ModelDocument, RangeDoc, UnitDoc};
use crate::{LoadError, SCHEMA_VERSION};

/// Units and catalog ready for verification and dispatch.
#[derive(Clone, Debug, Default)]
pub struct LoadedModel {
    /// Subprograms first, then threads, then processes.
    pub units: Vec<GenerationUnit>,
    pub catalog: TypeCatalog,
}

/// Parse one JSON model document, checking its schema version first.
///
/// The version is read before the rest of the document so that a newer
/// document is reported as such rather than as a shape mismatch.
pub fn parse_document(text: &str, origin: &str) -> Result<ModelDocument, LoadError> {
    let json_error = |source| LoadError::Json {
        origin: origin.to_string(),
        source,
    };
    let value: serde_json::Value = serde_json::from_str(text).map_err(json_error)?;
    let found = value.get("schema_version").and_then(serde_json::Value::as_u64);
    if found != Some(SCHEMA_VERSION) {
        return Err(LoadError::SchemaVersion {
            origin: origin.to_string(),
            found,
        });
    }
    serde_json::from_value(value).map_err(json_error)
}

/// Merges model documents, in the order they are added, into one
/// [`LoadedModel`].
#[derive(Debug, Default)]
pub struct ModelLoader {
    units: Vec<GenerationUnit>,
    catalog: TypeCatalog,
    only_subprograms: bool,
}

impl ModelLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep subprogram units only; threads and processes are dropped.
    #[must_use]
    pub fn only_subprograms(mut self, only: bool) -> Self {
        self.only_subprograms = only;
        self
    }

    pub fn load_file(&mut self, path: &Path) -> Result<(), LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_str(&text, &path.display().to_string())
    }

    pub fn load_str(&mut self, text: &str, origin: &str) -> Result<(), LoadError> {
        let document = parse_document(text, origin)?;
        self.add_document(document, origin)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(origin = %origin))]
    pub fn add_document(&mut self, document: ModelDocument, origin: &str) -> Result<(), LoadError> {
        self.add_catalog(document.catalog)?;
        for unit in document.units {
            if let Some(unit) = convert_unit(unit, origin)? {
                if self.only_subprograms && unit.kind() != ContainerKind::Subprogram {
                    debug!(unit = %unit, kind = unit.kind().as_str(), "not a subprogram, dropped");
                    continue;
                }
                self.units.push(unit);
            }
        }
        Ok(())
    }

    fn add_catalog(&mut self, catalog: CatalogDoc) -> Result<(), LoadError> {
        for source in catalog.sources {
            let source_id = CatalogSourceId::new(source.id);
            for ty in source.types {
                let location = SourceLocation::new(source_id.as_str(), ty.line);
                let mut node = TypeNode::new(ty.name, LeafType::parse(&ty.leaf), source_id.clone())
                    .with_location(location);
                if ty.artificial {
                    node = node.artificial();
                }
                if let Some(range) = ty.range {
                    node = node.with_range(convert_range(range));
                }
                self.catalog.insert(node)?;
            }
        }
        for name in catalog.skip {
            self.catalog.skip(name);
        }
        Ok(())
    }

    /// Finish loading. Units are ordered by container kind; the sort is
    /// stable so declaration order survives inside each kind.
    pub fn finish(self) -> LoadedModel {
        let mut units = self.units;
        units.sort_by_key(|unit| unit.kind().schedule_rank());
        debug!(
            units = units.len(),
            types = self.catalog.len(),
            skipped = self.catalog.skipped_count(),
            "model loaded"
        );
        LoadedModel {
            units,
            catalog: self.catalog,
        }
    }
}

fn convert_unit(doc: UnitDoc, origin: &str) -> Result<Option<GenerationUnit>, LoadError> {
    let Some(raw_target) = doc.target else {
        debug!(
            container = %doc.container_id,
            implementation = %doc.implementation,
            "no target language, dropped"
        );
        return Ok(None);
    };
    let target = raw_target
        .parse::<TargetLanguage>()
        .map_err(|source| LoadError::UnsupportedTarget {
            origin: origin.to_string(),
            unit: format!("{}.{}", doc.container_id, doc.implementation),
            source,
        })?;

    let kind = match doc.kind {
        KindDoc::Subprogram => ContainerKind::Subprogram,
        KindDoc::Thread => ContainerKind::Thread,
        KindDoc::Process => ContainerKind::Process,
    };
    let mut unit = GenerationUnit::new(kind, doc.container_id, doc.implementation, target);
    if let Some(view) = doc.function_view {
        unit = unit.with_variant_name(view);
    }
    for param in doc.params {
        let direction = match param.direction {
            DirectionDoc::In => Direction::In,
            DirectionDoc::Out => Direction::Out,
        };
        let signal = TypedSignal::new(param.source, param.type_name);
        unit = unit.with_param(Parameter::new(param.id, direction, signal));
    }
    Ok(Some(unit))
}

/// Absent limits are unbounded.
fn convert_range(range: RangeDoc) -> ValueRange {
    ValueRange::new(
        range.low.unwrap_or(f64::NEG_INFINITY),
        range.high.unwrap_or(f64::INFINITY),
    )
}
