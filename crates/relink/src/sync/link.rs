use super::{exec::Exec, fan_out, Add, AssociationOps, OperationSet};
use crate::{Db, Error, Instance, Result};

use relink_core::stmt::{Record, Value};

impl Exec<'_, '_> {
    /// Attach the desired records to every parent and save it.
    pub(super) async fn phase_link(&mut self) -> Result<()> {
        let db = self.db;
        let ops = self.ops;
        let limit = self.limit();

        fan_out::try_join(
            limit,
            self.parents
                .iter_mut()
                .map(move |parent| link_parent(db, ops, limit, parent)),
        )
        .await?;

        Ok(())
    }
}

async fn link_parent(
    db: &Db,
    ops: &OperationSet<'_>,
    limit: Option<usize>,
    parent: &mut Instance,
) -> Result<()> {
    // Collections are linked by the parent itself when saved. Belongs-to
    // targets must exist before the parent can point at them.
    let mut to_create = vec![];

    for association in ops.iter() {
        for add in &association.add {
            if association.association.is_collection() {
                parent.add(association.name(), add.clone());
            } else if let Add::Create(record) = add {
                to_create.push((association, record));
            }
        }
    }

    let created = fan_out::try_join(
        limit,
        to_create
            .into_iter()
            .map(|(association, record)| create(db, association, record)),
    )
    .await?;

    for (name, key) in created {
        parent.set(name, key);
    }

    tracing::debug!(pending = parent.pending().len(), "saving parent");
    parent.save(db).await
}

/// Create `record` in the association's target, returning the association
/// name and the new key.
async fn create<'a>(
    db: &Db,
    ops: &AssociationOps<'a>,
    record: &Record,
) -> Result<(&'a str, Value)> {
    let target = ops.association.target;
    let created = db.create(&target.name, record.clone()).await?;

    let key = target
        .key_of(&created)
        .cloned()
        .ok_or_else(|| Error::missing_primary_key(&target.name, &target.primary_key))?;

    Ok((ops.name(), key))
}
