use super::{exec::Exec, fan_out, AssociationOps};
use crate::{Db, Instance, Result};

use relink_core::{
    schema::{AssociationKind, Model},
    stmt::{Criteria, Record, Value},
};

/// Detaches the records linked to one parent through one association.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Unlink<'a> {
    pub(super) model: &'a str,
    pub(super) criteria: Criteria,
    pub(super) key_name: &'a str,

    /// Null `key_name` on the matching rows. When `false` the rows are
    /// destroyed.
    pub(super) nullify: bool,
}

impl<'a> Unlink<'a> {
    /// Derive the unlink for the parent of `model` keyed by `key`.
    ///
    /// Returns `None` when the child does not point back at the parent
    /// through a foreign key.
    pub(super) fn derive(model: &'a Model, ops: &AssociationOps<'a>, key: &Value) -> Option<Self> {
        let association = &ops.association;

        if let AssociationKind::BelongsTo = association.kind {
            return Some(Self {
                model: &model.name,
                criteria: Criteria::eq(&model.primary_key, key.clone()),
                key_name: association.name,
                nullify: true,
            });
        }

        let (child, via) = association.via()?;

        if !via.is_belongs_to() {
            tracing::debug!(
                association = association.name,
                model = %child.name,
                field = %via.name,
                "reciprocal field is not a foreign key; nothing to unlink"
            );
            return None;
        }

        Some(Self {
            model: &child.name,
            criteria: Criteria::eq(&via.name, key.clone()),
            key_name: &via.name,
            nullify: !child.junction_table,
        })
    }

    async fn run(self, db: &Db) -> Result<()> {
        if self.nullify {
            let mut values = Record::new();
            values.insert(self.key_name.to_string(), Value::Null);
            db.update(self.model, self.criteria, values).await?;
        } else {
            db.destroy(self.model, self.criteria).await?;
        }
        Ok(())
    }
}

impl Exec<'_, '_> {
    /// Detach every association in the operation set from every parent.
    pub(super) async fn phase_unlink(&mut self) -> Result<()> {
        let db = self.db;
        let model = self.model;
        let ops = self.ops;
        let limit = self.limit();
        let parents: &[Instance] = &*self.parents;

        fan_out::try_join(
            limit,
            parents.iter().map(move |parent| async move {
                let key = parent.key(model)?;
                let instructions = ops.iter().filter_map(|ops| Unlink::derive(model, ops, key));

                fan_out::try_join(limit, instructions.map(|unlink| unlink.run(db))).await
            }),
        )
        .await?;

        Ok(())
    }
}
