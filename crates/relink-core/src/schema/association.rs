use super::{Field, Model};

/// A resolved association: the owning model, the target records are created
/// in, and how the two are physically linked.
#[derive(Debug, Clone, Copy)]
pub struct Association<'a> {
    /// Field name on the owning model
    pub name: &'a str,

    /// Model declaring the association
    pub source: &'a Model,

    /// Model whose records are associated
    pub target: &'a Model,

    pub kind: AssociationKind<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum AssociationKind<'a> {
    /// The owner stores the target's key in the association field.
    BelongsTo,

    /// The target stores the owner's key in its `via` field.
    HasMany { via: &'a str },

    /// Rows of `join` link owner and target: `via` holds the owner's key and
    /// `references` the target's.
    ManyToMany {
        join: &'a Model,
        via: &'a str,
        references: &'a str,
    },
}

impl<'a> Association<'a> {
    pub fn is_belongs_to(&self) -> bool {
        matches!(self.kind, AssociationKind::BelongsTo)
    }

    pub fn is_collection(&self) -> bool {
        !self.is_belongs_to()
    }

    /// The model holding the pointer back at the owner, for collections.
    ///
    /// This is the join model for many-to-many associations and the target
    /// for has-many associations.
    pub fn child(&self) -> Option<&'a Model> {
        match self.kind {
            AssociationKind::BelongsTo => None,
            AssociationKind::HasMany { .. } => Some(self.target),
            AssociationKind::ManyToMany { join, .. } => Some(join),
        }
    }

    /// The child's field named by `via`, for collections.
    pub fn via(&self) -> Option<(&'a Model, &'a Field)> {
        let child = self.child()?;
        let via = match self.kind {
            AssociationKind::BelongsTo => return None,
            AssociationKind::HasMany { via } => via,
            AssociationKind::ManyToMany { via, .. } => via,
        };
        Some((child, child.field_by_name(via)?))
    }
}
