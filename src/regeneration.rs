//! Regeneration coordinator
//!
//! Safely replaces previously generated artifacts. For every class in the
//! model, strictly in model order: resolve the fully-qualified name in the
//! artifact registry, delete the old artifact if one is recorded, then hand
//! the class to the emitter and record the new artifact. A deletion failure
//! aborts the whole run; classes already replaced stay replaced, classes not
//! yet reached stay untouched. There is no rollback.

use crate::emit::ClassEmitter;
use crate::error::MakerError;
use crate::model::{ClassDefinition, DefinitionModel};
use crate::registry::ArtifactRegistry;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Caller-supplied per-class completion callback, invoked after a class has
/// been fully replaced (old artifact removed, new one emitted).
pub type ClassObserver<'a> = &'a mut dyn FnMut(&ClassDefinition);

/// Summary of one regeneration run.
#[derive(Debug, Clone)]
pub struct RegenerationReport {
    /// Number of classes emitted.
    pub class_count: usize,
    /// Number of previous artifacts removed.
    pub removed_count: usize,
    /// Emitted artifacts: (FQN, path), in emission order.
    pub emitted: Vec<(String, PathBuf)>,
    /// Duration in milliseconds.
    pub duration_ms: u64,
}

/// Replace all classes in the model.
///
/// The registry is persisted after every removal and after every emit so an
/// aborted run still reflects exactly which artifacts are on disk.
pub fn regenerate(
    model: &DefinitionModel,
    registry: &mut ArtifactRegistry,
    emitter: &dyn ClassEmitter,
    mut observer: Option<ClassObserver<'_>>,
) -> Result<RegenerationReport, MakerError> {
    let start = Instant::now();
    info!(class_count = model.class_count(), "Regeneration starting");

    let mut removed_count = 0;
    let mut emitted = Vec::with_capacity(model.class_count());

    for class in model.classes() {
        let fqn = class.full_name();

        if let Some(previous) = registry.resolve(&fqn).map(PathBuf::from) {
            debug!(fqn = %fqn, path = %previous.display(), "Removing previous artifact");
            fs::remove_file(&previous).map_err(|e| {
                warn!(fqn = %fqn, "Aborting regeneration: previous artifact could not be removed");
                MakerError::Replacement {
                    fqn: fqn.clone(),
                    reason: format!("{} ({})", e, previous.display()),
                }
            })?;
            registry.forget(&fqn);
            // Persist before emitting: if the emitter fails now, the index
            // must not keep claiming the file that was just deleted.
            registry
                .save()
                .map_err(|e| MakerError::Registry(e.to_string()))?;
            removed_count += 1;
        }

        let path = emitter.emit(class)?;
        registry.record(fqn.clone(), path.clone());
        registry
            .save()
            .map_err(|e| MakerError::Registry(e.to_string()))?;

        if let Some(callback) = observer.as_deref_mut() {
            callback(class);
        }
        emitted.push((fqn, path));
    }

    let report = RegenerationReport {
        class_count: emitted.len(),
        removed_count,
        emitted,
        duration_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        class_count = report.class_count,
        removed_count = report.removed_count,
        duration_ms = report.duration_ms,
        "Regeneration complete"
    );
    Ok(report)
}
