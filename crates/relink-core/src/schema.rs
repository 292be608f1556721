//! Association metadata registry.
//!
//! The registry answers two questions for the sync engine: how a model is
//! keyed, and how one of its associations is physically linked. Models are
//! registered once through [`Builder`] and read concurrently afterwards.

mod association;
pub use association::{Association, AssociationKind};

mod auto;
pub use auto::AutoStrategy;

mod builder;
pub use builder::Builder;

mod field;
pub use field::{Field, FieldTy};

mod model;
pub use model::Model;

mod relation;
pub use relation::{BelongsTo, HasMany, Through};

use indexmap::IndexMap;

#[derive(Debug, Default)]
pub struct Schema {
    models: IndexMap<String, Model>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Get a model by name.
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    /// Describe the association `name` declared on `model`.
    ///
    /// Returns `None` when the field does not exist, is not an association,
    /// or points at a model that is not registered. Callers treat `None` as
    /// "nothing to sync" rather than as an error.
    pub fn association<'a>(&'a self, model: &str, name: &str) -> Option<Association<'a>> {
        let source = self.model(model)?;
        let field = source.field_by_name(name)?;

        match &field.ty {
            FieldTy::Primitive => None,
            FieldTy::BelongsTo(belongs_to) => Some(Association {
                name: &field.name,
                source,
                target: self.model(&belongs_to.target)?,
                kind: AssociationKind::BelongsTo,
            }),
            FieldTy::HasMany(has_many) => {
                let target = self.model(&has_many.target)?;

                let kind = match &has_many.through {
                    Some(through) => AssociationKind::ManyToMany {
                        join: self.model(&through.model)?,
                        via: &has_many.via,
                        references: &through.references,
                    },
                    None => AssociationKind::HasMany { via: &has_many.via },
                };

                Some(Association {
                    name: &field.name,
                    source,
                    target,
                    kind,
                })
            }
        }
    }
}
