use super::{exec::Exec, fan_out, UpdateOp};
use crate::{Db, Result};

impl Exec<'_, '_> {
    /// Update every keyed record named in the operation set.
    pub(super) async fn phase_update(&mut self) -> Result<()> {
        let db = self.db;
        let limit = self.limit();

        fan_out::try_join(
            limit,
            self.ops.iter().map(move |ops| {
                fan_out::try_join(limit, ops.update.iter().map(move |op| update_one(db, op)))
            }),
        )
        .await?;

        Ok(())
    }
}

async fn update_one(db: &Db, op: &UpdateOp) -> Result<()> {
    let updated = db
        .update(&op.model, op.criteria.clone(), op.values.clone())
        .await?;

    if updated.is_empty() {
        tracing::warn!(model = %op.model, criteria = %op.criteria, "update matched no record");
    }

    Ok(())
}
