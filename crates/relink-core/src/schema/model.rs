use super::{AutoStrategy, BelongsTo, Field, FieldTy, HasMany, Through};
use crate::stmt::{Record, Value};

/// A registered model.
///
/// Models are declared with the chaining constructors below:
///
/// ```
/// use relink_core::schema::Model;
///
/// let post = Model::new("post")
///     .field("title")
///     .belongs_to("owner", "user")
///     .has_many("comments", "comment", "post")
///     .many_to_many("tags", "tag", "post_tag", "post", "tag");
///
/// assert_eq!(post.primary_key, "id");
/// assert!(post.field_by_name("tags").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    /// Name of the model, unique within the schema
    pub name: String,

    /// Name of the single primary key field
    pub primary_key: String,

    /// How the primary key is generated when an insert omits it
    pub auto: Option<AutoStrategy>,

    /// A join model whose rows only represent linkage. Unlinking destroys
    /// such rows instead of nulling their foreign key.
    pub junction_table: bool,

    /// Fields contained by the model, excluding the primary key
    pub fields: Vec<Field>,
}

impl Model {
    /// A model keyed by an auto-incrementing `id`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_key: "id".to_string(),
            auto: Some(AutoStrategy::Increment),
            junction_table: false,
            fields: vec![],
        }
    }

    pub fn primary_key(mut self, name: impl Into<String>) -> Self {
        self.primary_key = name.into();
        self
    }

    pub fn auto(mut self, auto: Option<AutoStrategy>) -> Self {
        self.auto = auto;
        self
    }

    /// Flag the model as a bare junction table.
    pub fn junction_table(mut self) -> Self {
        self.junction_table = true;
        self
    }

    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.push(name, FieldTy::Primitive);
        self
    }

    pub fn belongs_to(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.push(
            name,
            BelongsTo {
                target: target.into(),
            },
        );
        self
    }

    pub fn has_many(
        mut self,
        name: impl Into<String>,
        target: impl Into<String>,
        via: impl Into<String>,
    ) -> Self {
        self.push(
            name,
            HasMany {
                target: target.into(),
                via: via.into(),
                through: None,
            },
        );
        self
    }

    /// A collection linked through `join`, whose `via` field points at this
    /// model and whose `references` field points at `target`.
    pub fn many_to_many(
        mut self,
        name: impl Into<String>,
        target: impl Into<String>,
        join: impl Into<String>,
        via: impl Into<String>,
        references: impl Into<String>,
    ) -> Self {
        self.push(
            name,
            HasMany {
                target: target.into(),
                via: via.into(),
                through: Some(Through {
                    model: join.into(),
                    references: references.into(),
                }),
            },
        );
        self
    }

    fn push(&mut self, name: impl Into<String>, ty: impl Into<FieldTy>) {
        let name = name.into();
        self.fields.retain(|field| field.name != name);
        self.fields.push(Field {
            name,
            ty: ty.into(),
        });
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns `true` if `name` is stored in this model's rows.
    pub fn is_stored(&self, name: &str) -> bool {
        name == self.primary_key
            || self
                .field_by_name(name)
                .map(Field::is_stored)
                .unwrap_or(true)
    }

    /// Read the primary key of `record`, treating `null` as absent.
    pub fn key_of<'a>(&self, record: &'a Record) -> Option<&'a Value> {
        record.get(&self.primary_key).filter(|value| !value.is_null())
    }
}
