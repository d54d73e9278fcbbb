//! Backend registry.
//!
//! The set of backends is closed and compiled in. A [`BackendFactory`]
//! supplies one instance per backend identity when the registry is built;
//! instances then live for the whole run and are only ever borrowed by the
//! engine and the router.
//!
//! Target-to-backend selection is a total, exhaustive match over
//! [`TargetLanguage`]. The lifecycle mode of a backend is a static property
//! of its identity.

use std::fmt;

use glue_ir::TargetLanguage;

use crate::{AsyncBackend, DispatchError, SyncBackend};

/// Backends with a per-unit lifecycle.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SyncBackendId {
    Gui,
    Python,
    PySide,
    QGenC,
    Scade6,
    Simulink,
    Vhdl,
}

impl SyncBackendId {
    pub const ALL: [SyncBackendId; 7] = [
        SyncBackendId::Gui,
        SyncBackendId::Python,
        SyncBackendId::PySide,
        SyncBackendId::QGenC,
        SyncBackendId::Scade6,
        SyncBackendId::Simulink,
        SyncBackendId::Vhdl,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SyncBackendId::Gui => "gui",
            SyncBackendId::Python => "python",
            SyncBackendId::PySide => "pyside",
            SyncBackendId::QGenC => "qgenc",
            SyncBackendId::Scade6 => "scade6",
            SyncBackendId::Simulink => "simulink",
            SyncBackendId::Vhdl => "vhdl",
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Backends with a run-wide lifecycle.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AsyncBackendId {
    Ada,
    C,
    Og,
    QGenAda,
    Rtds,
    Sdl,
}

impl AsyncBackendId {
    pub const ALL: [AsyncBackendId; 6] = [
        AsyncBackendId::Ada,
        AsyncBackendId::C,
        AsyncBackendId::Og,
        AsyncBackendId::QGenAda,
        AsyncBackendId::Rtds,
        AsyncBackendId::Sdl,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AsyncBackendId::Ada => "ada",
            AsyncBackendId::C => "c",
            AsyncBackendId::Og => "og",
            AsyncBackendId::QGenAda => "qgenada",
            AsyncBackendId::Rtds => "rtds",
            AsyncBackendId::Sdl => "sdl",
        }
    }

    /// Whole-catalog backends build codecs for every type of the catalog,
    /// not only for the types their units' parameters use.
    pub fn whole_catalog(self) -> bool {
        match self {
            AsyncBackendId::Ada | AsyncBackendId::C | AsyncBackendId::QGenAda => true,
            AsyncBackendId::Og | AsyncBackendId::Rtds | AsyncBackendId::Sdl => false,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Identity of any registered backend.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BackendId {
    Sync(SyncBackendId),
    Async(AsyncBackendId),
}

impl BackendId {
    pub fn as_str(self) -> &'static str {
        match self {
            BackendId::Sync(id) => id.as_str(),
            BackendId::Async(id) => id.as_str(),
        }
    }

    /// The backend the main dispatch path uses for `target`.
    ///
    /// GUI, VHDL and Rhapsody targets go to the C backend, which builds the
    /// codecs their glue needs. The PySide and VHDL backends are only
    /// reachable through the custom router.
    pub fn for_target(target: TargetLanguage) -> Self {
        match target {
            TargetLanguage::C
            | TargetLanguage::GuiRi
            | TargetLanguage::GuiPi
            | TargetLanguage::Vhdl
            | TargetLanguage::Rhapsody => BackendId::Async(AsyncBackendId::C),
            TargetLanguage::Ada => BackendId::Async(AsyncBackendId::Ada),
            TargetLanguage::Sdl => BackendId::Async(AsyncBackendId::Sdl),
            TargetLanguage::Og => BackendId::Async(AsyncBackendId::Og),
            TargetLanguage::QGenAda => BackendId::Async(AsyncBackendId::QGenAda),
            TargetLanguage::Rtds => BackendId::Async(AsyncBackendId::Rtds),
            TargetLanguage::Gui => BackendId::Sync(SyncBackendId::Gui),
            TargetLanguage::Python => BackendId::Sync(SyncBackendId::Python),
            TargetLanguage::QGenC => BackendId::Sync(SyncBackendId::QGenC),
            TargetLanguage::Scade6 => BackendId::Sync(SyncBackendId::Scade6),
            TargetLanguage::Simulink => BackendId::Sync(SyncBackendId::Simulink),
        }
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SyncBackendId> for BackendId {
    fn from(id: SyncBackendId) -> Self {
        BackendId::Sync(id)
    }
}

impl From<AsyncBackendId> for BackendId {
    fn from(id: AsyncBackendId) -> Self {
        BackendId::Async(id)
    }
}

/// Supplies the backend instances a registry is built from.
pub trait BackendFactory {
    fn sync_backend(&mut self, id: SyncBackendId) -> Box<dyn SyncBackend>;
    fn async_backend(&mut self, id: AsyncBackendId) -> Box<dyn AsyncBackend>;
}

/// A borrowed backend together with its lifecycle mode.
pub enum BackendHandle<'a> {
    Synchronous {
        id: SyncBackendId,
        backend: &'a mut dyn SyncBackend,
    },
    Asynchronous {
        id: AsyncBackendId,
        backend: &'a mut dyn AsyncBackend,
    },
}

impl BackendHandle<'_> {
    pub fn id(&self) -> BackendId {
        match self {
            BackendHandle::Synchronous { id, .. } => BackendId::Sync(*id),
            BackendHandle::Asynchronous { id, .. } => BackendId::Async(*id),
        }
    }
}

/// Run-scoped owner of every backend instance.
pub struct BackendRegistry {
    sync: [Box<dyn SyncBackend>; 7],
    asynchronous: [Box<dyn AsyncBackend>; 6],
}

impl BackendRegistry {
    /// Instantiate every backend, in identity declaration order.
    pub fn build(factory: &mut dyn BackendFactory) -> Self {
        BackendRegistry {
            sync: SyncBackendId::ALL.map(|id| factory.sync_backend(id)),
            asynchronous: AsyncBackendId::ALL.map(|id| factory.async_backend(id)),
        }
    }

    /// The backend driving `target` on the main dispatch path.
    pub fn resolve(&mut self, target: TargetLanguage) -> BackendHandle<'_> {
        match BackendId::for_target(target) {
            BackendId::Sync(id) => BackendHandle::Synchronous {
                id,
                backend: self.sync_mut(id),
            },
            BackendId::Async(id) => BackendHandle::Asynchronous {
                id,
                backend: self.async_mut(id),
            },
        }
    }

    /// Resolve a raw target identifier, as written in a model. An unknown
    /// identifier is [`DispatchError::UnsupportedTarget`].
    pub fn resolve_name(&mut self, name: &str) -> Result<BackendHandle<'_>, DispatchError> {
        let target = name.parse::<TargetLanguage>()?;
        Ok(self.resolve(target))
    }

    pub fn sync_mut(&mut self, id: SyncBackendId) -> &mut dyn SyncBackend {
        self.sync[id.index()].as_mut()
    }

    pub fn async_mut(&mut self, id: AsyncBackendId) -> &mut dyn AsyncBackend {
        self.asynchronous[id.index()].as_mut()
    }

    /// Borrow several synchronous backends at once, in the order of `ids`.
    /// Repeated ids are returned once.
    pub fn sync_many(&mut self, ids: &[SyncBackendId]) -> Vec<(SyncBackendId, &mut dyn SyncBackend)> {
        let mut slots: Vec<Option<&mut Box<dyn SyncBackend>>> =
            self.sync.iter_mut().map(Some).collect();
        ids.iter()
            .filter_map(|&id| {
                let backend = slots.get_mut(id.index())?.take()?;
                Some((id, backend.as_mut() as &mut dyn SyncBackend))
            })
            .collect()
    }
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("sync", &SyncBackendId::ALL)
            .field("asynchronous", &AsyncBackendId::ALL)
            .finish()
    }
}

#[cfg(test)]
mod tests;
