// irods-share-host/src/library.rs
use libloading::{Library, Symbol};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use irods_share_common::{MsFn, MsTableEntry, PluginFactoryFn, SymbolResolver, PLUGIN_FACTORY_SYMBOL};

use crate::error::HostError;

/// A loaded microservice plugin and the table its factory returned.
///
/// Function pointers resolved from the library are only valid while this
/// value is alive; drop any registry holding them first.
pub struct PluginLibrary {
    // Dropped before `library` so the table never outlives its code.
    table: Box<MsTableEntry>,
    path: PathBuf,
    library: Library,
}

impl PluginLibrary {
    /// Load `path`, call its `plugin_factory` and take ownership of the table.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HostError> {
        let path = path.as_ref().to_path_buf();
        info!("Loading plugin library {}", path.display());

        // SAFETY: loading runs the library's initializers; plugins are trusted code.
        let library = unsafe { Library::new(&path) }.map_err(|source| HostError::Load {
            path: path.clone(),
            source,
        })?;

        let raw = {
            // SAFETY: the reserved symbol is declared with the PluginFactoryFn signature.
            let factory: Symbol<PluginFactoryFn> = unsafe { library.get(PLUGIN_FACTORY_SYMBOL) }
                .map_err(|source| HostError::MissingFactory {
                    path: path.clone(),
                    source,
                })?;
            // SAFETY: see above; the factory takes no arguments.
            unsafe { factory() }
        };

        // SAFETY: the pointer came from the plugin's into_raw and is reclaimed once, here.
        let table = unsafe { MsTableEntry::from_raw(raw) }
            .ok_or_else(|| HostError::NullTable(path.clone()))?;

        info!(
            "Plugin {} registered {} operation(s)",
            path.display(),
            table.operation_count()
        );
        Ok(PluginLibrary {
            table,
            path,
            library,
        })
    }

    pub fn table(&self) -> &MsTableEntry {
        &self.table
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn summary(&self) -> TableSummary {
        TableSummary {
            library: self.path.display().to_string(),
            table: (*self.table).clone(),
        }
    }
}

// SAFETY: implementation names in a plugin table refer to exported
// microservices with the MsFn signature, and the library stays loaded for
// as long as `self` does.
unsafe impl SymbolResolver for PluginLibrary {
    fn resolve(&self, function_name: &str) -> Option<MsFn> {
        debug!("Resolving {} in {}", function_name, self.path.display());
        let symbol: Symbol<MsFn> = unsafe { self.library.get(function_name.as_bytes()) }.ok()?;
        Some(*symbol)
    }
}

/// What `list` prints.
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub library: String,
    pub table: MsTableEntry,
}
