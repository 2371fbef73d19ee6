use crate::{
    error::OpenApiResult,
    schema::SchemaGenerator,
    shape::ShapeDescriptor,
    specification::{Parameter, ParameterIn, Schema},
};
use std::fmt;

type DescribeFn = fn(&mut SchemaGenerator) -> OpenApiResult<Schema>;

/// A route parameter waiting to be attached to an operation
///
/// The type parameter given at construction is used only to infer the
/// parameter's schema when it is attached with
/// [`OperationBuilder::params`](crate::operation::OperationBuilder::params).
#[derive(Clone)]
pub struct Param {
    name: String,
    location: ParameterIn,
    description: Option<String>,
    required: bool,
    deprecated: bool,
    allow_empty: bool,
    describe: DescribeFn,
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Param")
            .field("name", &self.name)
            .field("location", &self.location)
            .field("description", &self.description)
            .field("required", &self.required)
            .field("deprecated", &self.deprecated)
            .field("allow_empty", &self.allow_empty)
            .finish_non_exhaustive()
    }
}

impl Param {
    /// Create a parameter of type `T` at `location`
    pub fn new<T: ShapeDescriptor + ?Sized>(name: &str, location: ParameterIn) -> Self {
        Self {
            name: name.to_string(),
            location,
            description: None,
            required: false,
            deprecated: false,
            allow_empty: false,
            describe: SchemaGenerator::generate::<T>,
        }
    }

    /// Path parameter, e.g. `id` in `/users/{id}`
    pub fn path<T: ShapeDescriptor + ?Sized>(name: &str) -> Self {
        Self::new::<T>(name, ParameterIn::Path)
    }

    /// Query string parameter
    pub fn query<T: ShapeDescriptor + ?Sized>(name: &str) -> Self {
        Self::new::<T>(name, ParameterIn::Query)
    }

    /// Cookie parameter
    pub fn cookie<T: ShapeDescriptor + ?Sized>(name: &str) -> Self {
        Self::new::<T>(name, ParameterIn::Cookie)
    }

    /// Header parameter
    pub fn header<T: ShapeDescriptor + ?Sized>(name: &str) -> Self {
        Self::new::<T>(name, ParameterIn::Header)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> ParameterIn {
        self.location
    }

    /// Set the description of the parameter
    pub fn description(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    /// Mark the parameter as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Allow empty values for this parameter
    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    /// Deprecate the parameter
    ///
    /// Meant as the last call on a parameter, just before it is attached.
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Describe the parameter's type and produce the OpenAPI parameter
    pub fn into_parameter(self, generator: &mut SchemaGenerator) -> OpenApiResult<Parameter> {
        let schema = (self.describe)(generator)?;

        Ok(Parameter {
            name: self.name,
            location: self.location,
            description: self.description,
            required: self.required.then_some(true),
            deprecated: self.deprecated.then_some(true),
            allow_empty_value: self.allow_empty.then_some(true),
            schema: Some(schema),
        })
    }
}

/// Shorthand for [`Param::path`]
pub fn path_param<T: ShapeDescriptor + ?Sized>(name: &str) -> Param {
    Param::path::<T>(name)
}

/// Shorthand for [`Param::query`]
pub fn query_param<T: ShapeDescriptor + ?Sized>(name: &str) -> Param {
    Param::query::<T>(name)
}

/// Shorthand for [`Param::cookie`]
pub fn cookie_param<T: ShapeDescriptor + ?Sized>(name: &str) -> Param {
    Param::cookie::<T>(name)
}

/// Shorthand for [`Param::header`]
pub fn header_param<T: ShapeDescriptor + ?Sized>(name: &str) -> Param {
    Param::header::<T>(name)
}
