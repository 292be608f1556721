use super::OperationSet;
use crate::{Db, Instance, Result};

use relink_core::schema::Model;

/// One stage of a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Apply field updates to existing related records
    Update,

    /// Detach everything currently linked to each parent
    Unlink,

    /// Create and attach the desired records, then save each parent
    Link,
}

/// Phases executed in order. A phase starts only once every operation of
/// the previous phase completed successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub phases: Vec<Phase>,
}

impl Pipeline {
    /// Update, then unlink, then link.
    pub fn sync() -> Self {
        Self {
            phases: vec![Phase::Update, Phase::Unlink, Phase::Link],
        }
    }
}

pub(super) struct Exec<'a, 'b> {
    pub(super) db: &'a Db,
    pub(super) model: &'a Model,
    pub(super) ops: &'a OperationSet<'b>,
    pub(super) parents: &'a mut [Instance],
}

/// Run `pipeline` for `ops` against `parents`.
pub(super) async fn exec(
    db: &Db,
    model: &Model,
    pipeline: &Pipeline,
    ops: &OperationSet<'_>,
    parents: &mut [Instance],
) -> Result<()> {
    Exec {
        db,
        model,
        ops,
        parents,
    }
    .exec_pipeline(pipeline)
    .await
}

impl Exec<'_, '_> {
    async fn exec_pipeline(&mut self, pipeline: &Pipeline) -> Result<()> {
        for phase in &pipeline.phases {
            tracing::debug!(?phase, "starting phase");
            self.exec_phase(*phase).await?;
        }

        Ok(())
    }

    async fn exec_phase(&mut self, phase: Phase) -> Result<()> {
        match phase {
            Phase::Update => self.phase_update().await,
            Phase::Unlink => self.phase_unlink().await,
            Phase::Link => self.phase_link().await,
        }
    }

    pub(super) fn limit(&self) -> Option<usize> {
        self.db.config().max_concurrency
    }
}
