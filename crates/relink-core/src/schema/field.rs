use super::{BelongsTo, HasMany};

#[derive(Debug, Clone)]
pub struct Field {
    /// The field name, which is also the column name for stored fields.
    pub name: String,

    /// Primitive or relation.
    pub ty: FieldTy,
}

#[derive(Debug, Clone)]
pub enum FieldTy {
    /// A plain stored value.
    Primitive,

    /// A foreign key stored on this model, pointing at the target's primary
    /// key.
    BelongsTo(BelongsTo),

    /// A collection linked either by a foreign key on the target or through
    /// a join model. Not stored on this model.
    HasMany(HasMany),
}

impl Field {
    /// True if the field is physically stored in this model's rows.
    pub fn is_stored(&self) -> bool {
        !matches!(self.ty, FieldTy::HasMany(_))
    }

    pub fn is_belongs_to(&self) -> bool {
        matches!(self.ty, FieldTy::BelongsTo(_))
    }
}

impl From<BelongsTo> for FieldTy {
    fn from(value: BelongsTo) -> Self {
        Self::BelongsTo(value)
    }
}

impl From<HasMany> for FieldTy {
    fn from(value: HasMany) -> Self {
        Self::HasMany(value)
    }
}
