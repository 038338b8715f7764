// ── Namespace orchestration ──
//
// One `Namespace` per entity family. Reads resolve a path, fetch, and
// decode with the codec for the negotiated version. Writes follow a
// fixed sequence (configure, unimport, import) or (unimport, delete),
// stop at the first failing step, and report which step that was.
// Nothing already applied is rolled back.

use std::marker::PhantomData;
use std::sync::Arc;

use strum::{AsRefStr, Display};
use tracing::{debug, warn};

use panofly_api::{BulkElement, ImportKind, ReadMode, XapiClient};

use crate::codec::{self, Codec, Schema};
use crate::error::CoreError;
use crate::normalize::{self, EntitySet};
use crate::path::PathBuilder;
use crate::scope::Scope;

// ── Family contract ──────────────────────────────────────────────────

/// A named configuration object.
pub trait Entity {
    fn name(&self) -> &str;
}

/// Static description of one entity family.
pub trait Family: Send + Sync + 'static {
    type Entry: Entity + Clone + Send + Sync;
    type Schema: Schema<Entry = Self::Entry>;

    /// Segments between the device root and the name predicate.
    const SPINE: &'static [&'static str];
    /// Collection tag wrapping multi-entry writes.
    const BULK_TAG: &'static str;
    const IMPORT_KIND: ImportKind;

    /// Whether a written entry is imported into the target vsys.
    fn import_eligible(_entry: &Self::Entry) -> bool {
        true
    }
}

/// Human-readable family names used in audit records and errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub singular: String,
    pub plural: String,
}

impl Labels {
    pub fn new(singular: impl Into<String>, plural: impl Into<String>) -> Self {
        Self {
            singular: singular.into(),
            plural: plural.into(),
        }
    }
}

/// What to delete: a bare name, or an entity standing in for its name.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteTarget<E> {
    ByName(String),
    ByEntity(E),
}

impl<E: Entity> DeleteTarget<E> {
    pub fn name(&self) -> &str {
        match self {
            Self::ByName(name) => name,
            Self::ByEntity(entity) => entity.name(),
        }
    }
}

impl<E> From<&str> for DeleteTarget<E> {
    fn from(name: &str) -> Self {
        Self::ByName(name.to_owned())
    }
}

impl<E> From<String> for DeleteTarget<E> {
    fn from(name: String) -> Self {
        Self::ByName(name)
    }
}

/// One remote step of a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum WriteStep {
    /// The configuration write (`set` or `edit`).
    Configure,
    /// Removal from every vsys.
    Unimport,
    /// Import into the target vsys.
    Import,
    /// Removal of the configuration nodes.
    Delete,
}

// ── Namespace ────────────────────────────────────────────────────────

/// Read and write access to one entity family on a device.
pub struct Namespace<F: Family> {
    client: Arc<dyn XapiClient>,
    labels: Labels,
    paths: PathBuilder,
    _family: PhantomData<fn() -> F>,
}

impl<F: Family> Clone for Namespace<F> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            labels: self.labels.clone(),
            paths: self.paths,
            _family: PhantomData,
        }
    }
}

impl<F: Family> Namespace<F> {
    pub fn new(client: Arc<dyn XapiClient>, labels: Labels) -> Self {
        Self {
            client,
            labels,
            paths: PathBuilder::new(F::SPINE),
            _family: PhantomData,
        }
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn paths(&self) -> &PathBuilder {
        &self.paths
    }

    /// Codec for the session's negotiated version.
    pub fn codec(&self) -> Codec<F::Entry> {
        let version = self.client.version();
        let variant = codec::select::<F::Schema>(&version);
        debug!(%version, ?variant, "selected schema variant");
        variant.codec()
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Names in the candidate configuration.
    pub async fn get_list(&self, scope: &Scope) -> Result<Vec<String>, CoreError> {
        self.listing(ReadMode::Get, scope).await
    }

    /// Names in the running configuration.
    pub async fn show_list(&self, scope: &Scope) -> Result<Vec<String>, CoreError> {
        self.listing(ReadMode::Show, scope).await
    }

    /// Alias for [`get_list`](Self::get_list).
    pub async fn list_names(&self, scope: &Scope) -> Result<Vec<String>, CoreError> {
        self.get_list(scope).await
    }

    pub async fn get(&self, scope: &Scope, name: &str) -> Result<F::Entry, CoreError> {
        self.object(ReadMode::Get, scope, name).await
    }

    pub async fn show(&self, scope: &Scope, name: &str) -> Result<F::Entry, CoreError> {
        self.object(ReadMode::Show, scope, name).await
    }

    pub async fn get_all(&self, scope: &Scope) -> Result<Vec<F::Entry>, CoreError> {
        self.objects(ReadMode::Get, scope).await
    }

    pub async fn show_all(&self, scope: &Scope) -> Result<Vec<F::Entry>, CoreError> {
        self.objects(ReadMode::Show, scope).await
    }

    async fn listing(&self, mode: ReadMode, scope: &Scope) -> Result<Vec<String>, CoreError> {
        require_scope(scope)?;
        let path = self.paths.build::<&str>(scope, &[]);
        debug!(%mode, %path, "listing {}", self.labels.plural);
        let raw = self.client.read(mode, &path).await?;
        normalize::names(&raw)
    }

    async fn object(
        &self,
        mode: ReadMode,
        scope: &Scope,
        name: &str,
    ) -> Result<F::Entry, CoreError> {
        require_scope(scope)?;
        if name.is_empty() {
            return Err(CoreError::InvalidArgument {
                message: format!("{} name must not be empty", self.labels.singular),
            });
        }
        let codec = self.codec();
        let path = self.paths.build(scope, &[name]);
        debug!(%mode, %path, "reading {}", self.labels.singular);
        let raw = self.client.read(mode, &path).await?;
        let set = EntitySet::from(codec.decode(&raw)?);
        if set.len() > 1 {
            warn!(count = set.len(), name, "single-name read returned several entries");
        }
        set.into_first(&self.labels.singular, name)
    }

    async fn objects(&self, mode: ReadMode, scope: &Scope) -> Result<Vec<F::Entry>, CoreError> {
        require_scope(scope)?;
        let codec = self.codec();
        let path = self.paths.build::<&str>(scope, &[]);
        debug!(%mode, %path, "reading all {}", self.labels.plural);
        let raw = self.client.read(mode, &path).await?;
        let set = EntitySet::from(codec.decode(&raw)?);
        if set.is_empty() {
            debug!(%mode, "no {} configured", self.labels.plural);
        } else {
            debug!(%mode, count = set.len(), "decoded {}", self.labels.plural);
        }
        Ok(set.normalize())
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Create or update `entries`, then move them into `vsys`.
    ///
    /// Entries the family marks as not import-eligible are unimported but
    /// never imported. An empty slice does nothing.
    pub async fn set(
        &self,
        scope: &Scope,
        vsys: &str,
        entries: &[F::Entry],
    ) -> Result<(), CoreError> {
        if entries.is_empty() {
            return Ok(());
        }
        require_scope(scope)?;
        require_vsys(vsys)?;

        let codec = self.codec();
        let mut bulk = BulkElement::new(F::BULK_TAG);
        let mut names = Vec::with_capacity(entries.len());
        let mut eligible = Vec::with_capacity(entries.len());
        for entry in entries {
            let name = self.entry_name(entry)?;
            bulk.push(codec.encode(entry)?);
            if F::import_eligible(entry) {
                eligible.push(name.clone());
            }
            names.push(name);
        }
        self.client
            .log_action(&format!("(set) {}: {names:?}", self.labels.plural));

        let path = self.paths.write_path(scope, &names);
        debug!(%path, count = names.len(), "writing {}", self.labels.plural);
        self.client
            .set(&path, bulk.config())
            .await
            .map_err(|e| step_failed(WriteStep::Configure, &names, e))?;

        self.unimport(scope, &names).await?;
        if eligible.is_empty() {
            return Ok(());
        }
        self.import(scope, vsys, &eligible).await
    }

    /// Replace one entry in place, then move it into `vsys`.
    pub async fn edit(&self, scope: &Scope, vsys: &str, entry: &F::Entry) -> Result<(), CoreError> {
        require_scope(scope)?;
        require_vsys(vsys)?;
        let name = self.entry_name(entry)?;

        let codec = self.codec();
        let mut element = BulkElement::new(F::BULK_TAG);
        element.push(codec.encode(entry)?);
        self.client
            .log_action(&format!("(edit) {}: {name:?}", self.labels.singular));

        let names = vec![name];
        let path = self.paths.build(scope, &names);
        debug!(%path, "editing {}", self.labels.singular);
        self.client
            .edit(&path, element.config())
            .await
            .map_err(|e| step_failed(WriteStep::Configure, &names, e))?;

        self.unimport(scope, &names).await?;
        if !F::import_eligible(entry) {
            return Ok(());
        }
        self.import(scope, vsys, &names).await
    }

    /// Unimport, then remove, every target.
    pub async fn delete(
        &self,
        scope: &Scope,
        targets: &[DeleteTarget<F::Entry>],
    ) -> Result<(), CoreError> {
        if targets.is_empty() {
            return Ok(());
        }
        require_scope(scope)?;

        let names = targets
            .iter()
            .map(|target| match target.name() {
                "" => Err(CoreError::InvalidArgument {
                    message: format!("cannot delete a {} without a name", self.labels.singular),
                }),
                name => Ok(name.to_owned()),
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.client
            .log_action(&format!("(delete) {}: {names:?}", self.labels.plural));

        self.unimport(scope, &names).await?;

        let path = self.paths.build(scope, &names);
        debug!(%path, count = names.len(), "deleting {}", self.labels.plural);
        self.client
            .delete(&path)
            .await
            .map_err(|e| step_failed(WriteStep::Delete, &names, e))?;
        Ok(())
    }

    // ── Helpers ──────────────────────────────────────────────────────

    fn entry_name(&self, entry: &F::Entry) -> Result<String, CoreError> {
        match entry.name() {
            "" => Err(CoreError::InvalidArgument {
                message: format!("{} name must not be empty", self.labels.singular),
            }),
            name => Ok(name.to_owned()),
        }
    }

    async fn unimport(&self, scope: &Scope, names: &[String]) -> Result<(), CoreError> {
        self.client
            .vsys_unimport(
                F::IMPORT_KIND,
                &scope.template,
                &scope.template_stack,
                names,
            )
            .await
            .map_err(|e| step_failed(WriteStep::Unimport, names, e))
    }

    async fn import(&self, scope: &Scope, vsys: &str, names: &[String]) -> Result<(), CoreError> {
        self.client
            .vsys_import(
                F::IMPORT_KIND,
                &scope.template,
                &scope.template_stack,
                vsys,
                names,
            )
            .await
            .map_err(|e| step_failed(WriteStep::Import, names, e))
    }
}

fn require_scope(scope: &Scope) -> Result<(), CoreError> {
    if scope.is_empty() {
        return Err(CoreError::precondition(
            "template or template stack must be specified",
        ));
    }
    Ok(())
}

fn require_vsys(vsys: &str) -> Result<(), CoreError> {
    if vsys.is_empty() {
        return Err(CoreError::precondition("vsys must be specified"));
    }
    Ok(())
}

fn step_failed(step: WriteStep, names: &[String], source: panofly_api::Error) -> CoreError {
    warn!(%step, ?names, error = %source, "write step failed");
    CoreError::Step {
        step,
        names: names.to_vec(),
        source,
    }
}
