#[derive(Debug, Clone)]
pub struct BelongsTo {
    /// Model referenced by the foreign key
    pub target: String,
}

#[derive(Debug, Clone)]
pub struct HasMany {
    /// Associated model
    pub target: String,

    /// Name of the foreign-key field pointing back at the owner. Declared on
    /// the target model, or on the join model when `through` is set.
    pub via: String,

    /// Join model linking owner and target, for many-to-many collections.
    pub through: Option<Through>,
}

#[derive(Debug, Clone)]
pub struct Through {
    /// The join model
    pub model: String,

    /// Foreign-key field on the join model pointing at the target
    pub references: String,
}
