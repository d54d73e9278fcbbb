//! Model document schema, version 1.
//!
//! ```json
//! {
//!   "schema_version": 1,
//!   "units": [
//!     {
//!       "kind": "subprogram",
//!       "container_id": "controller",
//!       "implementation": "impl",
//!       "target": "C",
//!       "function_view": "ctrl",
//!       "params": [
//!         { "id": "x", "direction": "in", "source": "dataview.asn", "type": "T-Int" }
//!       ]
//!     }
//!   ],
//!   "catalog": {
//!     "sources": [
//!       {
//!         "id": "dataview.asn",
//!         "types": [
//!           { "name": "T-Int", "leaf": "INTEGER", "line": 3,
//!             "range": { "low": 0, "high": 255 } }
//!         ]
//!       }
//!     ],
//!     "skip": ["T-Legacy"]
//!   }
//! }
//! ```
//!
//! A `null` (or absent) range limit means the limit is unbounded.

use serde::Deserialize;

/// The only schema version this build understands.
pub const SCHEMA_VERSION: u64 = 1;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDocument {
    pub schema_version: u64,
    #[serde(default)]
    pub units: Vec<UnitDoc>,
    #[serde(default)]
    pub catalog: CatalogDoc,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindDoc {
    Subprogram,
    Thread,
    Process,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionDoc {
    In,
    Out,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitDoc {
    pub kind: KindDoc,
    pub container_id: String,
    pub implementation: String,
    /// Units without a target are not glue-generated.
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub function_view: Option<String>,
    #[serde(default)]
    pub params: Vec<ParamDoc>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamDoc {
    pub id: String,
    pub direction: DirectionDoc,
    pub source: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDoc {
    #[serde(default)]
    pub sources: Vec<SourceDoc>,
    #[serde(default)]
    pub skip: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceDoc {
    pub id: String,
    #[serde(default)]
    pub types: Vec<TypeDoc>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDoc {
    pub name: String,
    /// Leaf kind as spelled by the catalog service (`SEQUENCE OF`, ...).
    pub leaf: String,
    #[serde(default)]
    pub artificial: bool,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub range: Option<RangeDoc>,
}

#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeDoc {
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
}
