use super::{FieldTy, Model, Schema};
use crate::{Error, Result};

#[derive(Debug, Default)]
pub struct Builder {
    models: Vec<Model>,
}

impl Builder {
    pub fn register(&mut self, model: Model) -> &mut Self {
        self.models.push(model);
        self
    }

    /// Build the schema, checking that model names are unique and that no
    /// field shadows a primary key.
    ///
    /// Relation targets are not checked. An association whose target is
    /// missing resolves to nothing and is skipped at sync time.
    pub fn build(&mut self) -> Result<Schema> {
        let mut schema = Schema::default();

        for model in self.models.drain(..) {
            if model.fields.iter().any(|field| field.name == model.primary_key) {
                return Err(Error::invalid_schema(format!(
                    "model `{}` declares its primary key `{}` as a field",
                    model.name, model.primary_key
                )));
            }

            for field in &model.fields {
                if let FieldTy::HasMany(has_many) = &field.ty {
                    if has_many.via.is_empty() {
                        return Err(Error::invalid_schema(format!(
                            "collection `{}.{}` has no `via` field",
                            model.name, field.name
                        )));
                    }
                }
            }

            if schema.models.contains_key(&model.name) {
                return Err(Error::invalid_schema(format!(
                    "model `{}` is registered twice",
                    model.name
                )));
            }

            schema.models.insert(model.name.clone(), model);
        }

        Ok(schema)
    }
}
