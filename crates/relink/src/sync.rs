//! Association sync.
//!
//! A sync runs in two steps. First the desired values are classified once
//! into an [`OperationSet`] (see [`plan`]). Then a fixed [`Pipeline`] of
//! three phases is executed against the store, with a barrier between
//! phases:
//!
//! 1. **update** existing related records with the supplied fields,
//! 2. **unlink** everything currently linked to each parent,
//! 3. **link** exactly the desired records, creating the new ones, then save
//!    each parent.
//!
//! Because every association is fully unlinked before it is relinked, the
//! linked set afterwards equals the desired set.

mod exec;
pub use exec::{Phase, Pipeline};

pub(crate) mod fan_out;

mod link;

pub mod plan;
pub use plan::{Add, AssociationOps, OperationSet, UpdateOp};

mod unlink;

mod update;

use crate::{Db, Error, Instance, Result};

use relink_core::stmt::Record;
use tracing::Instrument;

pub(crate) async fn apply(
    db: &Db,
    parents: &mut [Instance],
    values: &Record,
    associations: &[&str],
) -> Result<()> {
    let Some(first) = parents.first() else {
        tracing::debug!("sync called without parents");
        return Ok(());
    };

    let model = db
        .schema()
        .model(first.model())
        .ok_or_else(|| Error::invalid_schema(format!("model `{}` is not registered", first.model())))?;

    if let Some(other) = parents.iter().find(|parent| parent.model() != model.name) {
        relink_core::bail!(
            "parents must share a model; expected `{}`, found `{}`",
            model.name,
            other.model()
        );
    }

    for parent in parents.iter() {
        parent.key(model)?;
    }

    let span = tracing::debug_span!("sync", model = %model.name, parents = parents.len());

    async move {
        let ops = plan::build(db.schema(), model, associations, values, parents);

        if ops.is_empty() {
            tracing::debug!("nothing to sync");
            return Ok(());
        }

        exec::exec(db, model, &Pipeline::sync(), &ops, parents).await
    }
    .instrument(span)
    .await
}
