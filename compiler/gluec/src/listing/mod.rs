//! Listing backends.
//!
//! The backend family the driver ships with. Each backend writes
//! `<output>/<name>.glue.txt` describing every callback it received, which
//! makes a run's dispatch decisions inspectable without a code emitter.
//!
//! ```text
//! unit ping.impl target C source dataview.asn
//!   sequence T-Cmd p0 in
//! end ping.impl source dataview.asn
//! ```
//!
//! Synchronous backends append one block per unit. Asynchronous backends
//! write a single block on shutdown listing each catalog type once, in
//! first-seen order.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use glue_dispatch::{
    AsyncBackend, AsyncBackendId, BackendError, BackendFactory, BackendId, BackendResult,
    CatalogLeaf, RunContext, SyncBackend, SyncBackendId, UnitContext, UnitLeaf, UnitShutdown,
};
use glue_ir::CatalogSourceId;
use rustc_hash::FxHashSet;
use tracing::debug;

pub const LISTING_EXTENSION: &str = "glue.txt";

/// Listing file of `backend` inside `output_dir`.
pub fn listing_path(output_dir: &Path, backend: BackendId) -> PathBuf {
    output_dir.join(format!("{}.{LISTING_EXTENSION}", backend.as_str()))
}

/// Builds one [`ListingBackend`] per registry slot.
#[derive(Copy, Clone, Debug, Default)]
pub struct ListingFactory;

impl BackendFactory for ListingFactory {
    fn sync_backend(&mut self, id: SyncBackendId) -> Box<dyn SyncBackend> {
        Box::new(ListingBackend::new(BackendId::Sync(id)))
    }

    fn async_backend(&mut self, id: AsyncBackendId) -> Box<dyn AsyncBackend> {
        Box::new(ListingBackend::new(BackendId::Async(id)))
    }
}

#[derive(Debug)]
pub struct ListingBackend {
    id: BackendId,
    /// Set by the first `on_startup`.
    path: Option<PathBuf>,
    pending: Vec<String>,
    /// Types already listed in the current run-wide block.
    seen: FxHashSet<String>,
    /// The file has been created; later blocks are appended.
    created: bool,
}

impl ListingBackend {
    pub fn new(id: BackendId) -> Self {
        ListingBackend {
            id,
            path: None,
            pending: Vec::new(),
            seen: FxHashSet::default(),
            created: false,
        }
    }

    fn begin(&mut self, output_dir: &Path, header: String) {
        if self.path.is_none() {
            self.path = Some(listing_path(output_dir, self.id));
        }
        self.pending.push(header);
    }

    fn unit_line(&mut self, hook: &str, leaf: &UnitLeaf<'_>) -> BackendResult {
        self.pending.push(format!(
            "  {hook} {} {} {}",
            leaf.type_name,
            leaf.parameter.id,
            leaf.parameter.direction.as_str()
        ));
        Ok(())
    }

    fn catalog_line(&mut self, hook: &str, leaf: &CatalogLeaf<'_>) -> BackendResult {
        if self.seen.insert(leaf.type_name.to_string()) {
            self.pending.push(format!("  {hook} {}", leaf.type_name));
        }
        Ok(())
    }

    /// Write the pending block. The first block of a run truncates the file.
    fn flush(&mut self) -> BackendResult {
        let Some(path) = &self.path else {
            return Err(BackendError::msg(format!(
                "{} has no listing file: no startup was received",
                self.id
            )));
        };
        let file = if self.created {
            OpenOptions::new().append(true).open(path)?
        } else {
            File::create(path)?
        };
        let mut out = BufWriter::new(file);
        for line in self.pending.drain(..) {
            writeln!(out, "{line}")?;
        }
        out.flush()?;
        self.created = true;
        debug!(backend = %self.id, path = %path.display(), "listing written");
        Ok(())
    }
}

fn describe_variant(variant: Option<&str>) -> String {
    variant.map_or_else(String::new, |v| format!(" variant {v}"))
}

fn describe_source(source: Option<&CatalogSourceId>) -> String {
    source.map_or_else(|| "<none>".to_string(), ToString::to_string)
}

impl SyncBackend for ListingBackend {
    fn on_startup(&mut self, ctx: &UnitContext<'_>) -> BackendResult {
        let mut header = format!(
            "unit {} target {} source {}{}",
            ctx.unit,
            ctx.target,
            ctx.catalog_source,
            describe_variant(ctx.variant_name)
        );
        if ctx.use_external_tool {
            header.push_str(" external-codecs");
        }
        self.begin(ctx.output_dir, header);
        Ok(())
    }

    fn on_basic(&mut self, leaf: &UnitLeaf<'_>) -> BackendResult {
        self.unit_line("basic", leaf)
    }

    fn on_sequence(&mut self, leaf: &UnitLeaf<'_>) -> BackendResult {
        self.unit_line("sequence", leaf)
    }

    fn on_set(&mut self, leaf: &UnitLeaf<'_>) -> BackendResult {
        self.unit_line("set", leaf)
    }

    fn on_choice(&mut self, leaf: &UnitLeaf<'_>) -> BackendResult {
        self.unit_line("choice", leaf)
    }

    fn on_sequence_of(&mut self, leaf: &UnitLeaf<'_>) -> BackendResult {
        self.unit_line("sequence_of", leaf)
    }

    fn on_set_of(&mut self, leaf: &UnitLeaf<'_>) -> BackendResult {
        self.unit_line("set_of", leaf)
    }

    fn on_enumerated(&mut self, leaf: &UnitLeaf<'_>) -> BackendResult {
        self.unit_line("enumerated", leaf)
    }

    fn on_shutdown(&mut self, ctx: &UnitShutdown<'_>) -> BackendResult {
        self.pending
            .push(format!("end {} source {}", ctx.unit, ctx.catalog_source));
        self.flush()
    }

    fn on_final(&mut self) -> BackendResult {
        self.pending.push("final".to_string());
        self.flush()
    }
}

impl AsyncBackend for ListingBackend {
    fn on_startup(&mut self, ctx: &RunContext) -> BackendResult {
        let mut header = format!(
            "run target {} source {}{}",
            ctx.target,
            describe_source(ctx.catalog_source.as_ref()),
            describe_variant(ctx.variant_name.as_deref())
        );
        if ctx.use_external_tool {
            header.push_str(" external-codecs");
        }
        self.seen.clear();
        self.begin(&ctx.output_dir, header);
        Ok(())
    }

    fn on_basic(&mut self, leaf: &CatalogLeaf<'_>) -> BackendResult {
        self.catalog_line("basic", leaf)
    }

    fn on_sequence(&mut self, leaf: &CatalogLeaf<'_>) -> BackendResult {
        self.catalog_line("sequence", leaf)
    }

    fn on_set(&mut self, leaf: &CatalogLeaf<'_>) -> BackendResult {
        self.catalog_line("set", leaf)
    }

    fn on_choice(&mut self, leaf: &CatalogLeaf<'_>) -> BackendResult {
        self.catalog_line("choice", leaf)
    }

    fn on_sequence_of(&mut self, leaf: &CatalogLeaf<'_>) -> BackendResult {
        self.catalog_line("sequence_of", leaf)
    }

    fn on_set_of(&mut self, leaf: &CatalogLeaf<'_>) -> BackendResult {
        self.catalog_line("set_of", leaf)
    }

    fn on_enumerated(&mut self, leaf: &CatalogLeaf<'_>) -> BackendResult {
        self.catalog_line("enumerated", leaf)
    }

    fn on_shutdown(&mut self, ctx: &RunContext) -> BackendResult {
        self.pending.push(format!(
            "end target {} source {}{}",
            ctx.target,
            describe_source(ctx.catalog_source.as_ref()),
            describe_variant(ctx.variant_name.as_deref())
        ));
        self.flush()
    }
}
