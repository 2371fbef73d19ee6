/*!
Shape descriptors: the bridge between Rust types and OpenAPI schemas.

A type describes its own shape through [`ShapeDescriptor`]. Named shapes
(structs and enums, usually derived) end up in the component schema table and
are referenced by `$ref`; everything else is described inline.
*/

use crate::{
    error::OpenApiResult,
    schema::SchemaGenerator,
    specification::Schema,
};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// Coarse classification of a type's shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Record with named fields
    Struct,
    /// Variable-length sequence
    Slice,
    /// Key/value mapping
    Map,
    /// Fixed-length sequence
    Array,
    /// Strings, numbers, booleans, unit-only enums
    Scalar,
    /// Values whose shape is only known at runtime
    Opaque,
    /// No content at all
    Empty,
}

impl ShapeKind {
    /// Whether values of this kind are carried as JSON
    pub fn is_json(&self) -> bool {
        matches!(
            self,
            ShapeKind::Struct | ShapeKind::Slice | ShapeKind::Map | ShapeKind::Array
        )
    }
}

/// Types that can describe their shape as an OpenAPI schema
///
/// Derive it with `#[derive(ShapeDescriptor)]` for structs and unit-only
/// enums. Manual implementations are useful for types the derive cannot see
/// through; returning an error from [`describe`](Self::describe) makes the
/// builder skip the attach that needed the schema.
pub trait ShapeDescriptor {
    /// Kind used for content-type inference
    fn shape_kind() -> ShapeKind;

    /// Component name for named shapes, `None` for shapes described inline
    fn schema_name() -> Option<String> {
        None
    }

    /// Build the schema body. Nested types go through `generator` so named
    /// shapes are shared.
    fn describe(generator: &mut SchemaGenerator) -> OpenApiResult<Schema>;
}

/// Short, component-safe label for a type, e.g. `VecString` for `Vec<String>`
#[doc(hidden)]
pub fn type_label<T: ShapeDescriptor + ?Sized>() -> String {
    match T::schema_name() {
        Some(name) => name,
        None => short_type_name(std::any::type_name::<T>()),
    }
}

/// Strip module paths and punctuation from a `std::any::type_name` string
fn short_type_name(full: &str) -> String {
    let mut label = String::new();
    let mut ident = String::new();
    let mut chars = full.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_alphanumeric() || c == '_' {
            ident.push(c);
            continue;
        }
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            ident.clear();
            continue;
        }
        push_capitalized(&mut label, &ident);
        ident.clear();
    }
    push_capitalized(&mut label, &ident);
    label
}

fn push_capitalized(out: &mut String, word: &str) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
}

macro_rules! impl_scalar {
    ($($ty:ty => $schema:expr),* $(,)?) => {
        $(
            impl ShapeDescriptor for $ty {
                fn shape_kind() -> ShapeKind {
                    ShapeKind::Scalar
                }

                fn describe(_generator: &mut SchemaGenerator) -> OpenApiResult<Schema> {
                    Ok($schema)
                }
            }
        )*
    };
}

fn unsigned(format: &str) -> Schema {
    Schema {
        minimum: Some(0.0),
        ..Schema::with_format("integer", format)
    }
}

impl_scalar! {
    bool => Schema::of_type("boolean"),
    char => Schema::of_type("string"),
    String => Schema::of_type("string"),
    str => Schema::of_type("string"),
    i8 => Schema::with_format("integer", "int32"),
    i16 => Schema::with_format("integer", "int32"),
    i32 => Schema::with_format("integer", "int32"),
    i64 => Schema::with_format("integer", "int64"),
    i128 => Schema::of_type("integer"),
    isize => Schema::with_format("integer", "int64"),
    u8 => unsigned("int32"),
    u16 => unsigned("int32"),
    u32 => unsigned("int32"),
    u64 => unsigned("int64"),
    u128 => Schema { minimum: Some(0.0), ..Schema::of_type("integer") },
    usize => unsigned("int64"),
    f32 => Schema::with_format("number", "float"),
    f64 => Schema::with_format("number", "double"),
    uuid::Uuid => Schema::with_format("string", "uuid"),
    chrono::NaiveDate => Schema::with_format("string", "date"),
    chrono::NaiveDateTime => Schema::with_format("string", "date-time"),
    chrono::NaiveTime => Schema::with_format("string", "time"),
}

impl<Tz: chrono::TimeZone> ShapeDescriptor for chrono::DateTime<Tz> {
    fn shape_kind() -> ShapeKind {
        ShapeKind::Scalar
    }

    fn describe(_generator: &mut SchemaGenerator) -> OpenApiResult<Schema> {
        Ok(Schema::with_format("string", "date-time"))
    }
}

impl ShapeDescriptor for serde_json::Value {
    fn shape_kind() -> ShapeKind {
        ShapeKind::Opaque
    }

    fn describe(_generator: &mut SchemaGenerator) -> OpenApiResult<Schema> {
        Ok(Schema::default())
    }
}

impl ShapeDescriptor for () {
    fn shape_kind() -> ShapeKind {
        ShapeKind::Empty
    }

    fn describe(_generator: &mut SchemaGenerator) -> OpenApiResult<Schema> {
        Ok(Schema::default())
    }
}

macro_rules! impl_transparent {
    ($($wrapper:ident),*) => {
        $(
            impl<T: ShapeDescriptor + ?Sized> ShapeDescriptor for $wrapper<T> {
                fn shape_kind() -> ShapeKind {
                    T::shape_kind()
                }

                fn schema_name() -> Option<String> {
                    T::schema_name()
                }

                fn describe(generator: &mut SchemaGenerator) -> OpenApiResult<Schema> {
                    T::describe(generator)
                }
            }
        )*
    };
}

impl_transparent!(Box, Rc, Arc);

impl<T: ShapeDescriptor + ?Sized> ShapeDescriptor for &T {
    fn shape_kind() -> ShapeKind {
        T::shape_kind()
    }

    fn schema_name() -> Option<String> {
        T::schema_name()
    }

    fn describe(generator: &mut SchemaGenerator) -> OpenApiResult<Schema> {
        T::describe(generator)
    }
}

impl<T: ShapeDescriptor> ShapeDescriptor for Option<T> {
    fn shape_kind() -> ShapeKind {
        T::shape_kind()
    }

    fn describe(generator: &mut SchemaGenerator) -> OpenApiResult<Schema> {
        let schema = generator.generate::<T>()?;
        if !generator.config().nullable_optional {
            return Ok(schema);
        }

        // A 3.0 `$ref` ignores sibling keywords, so wrap it to carry `nullable`
        if schema.reference.is_some() {
            Ok(Schema {
                all_of: vec![schema],
                nullable: Some(true),
                ..Default::default()
            })
        } else {
            Ok(Schema {
                nullable: Some(true),
                ..schema
            })
        }
    }
}

fn array_of(items: Schema) -> Schema {
    Schema {
        schema_type: Some("array".to_string()),
        items: Some(Box::new(items)),
        ..Default::default()
    }
}

macro_rules! impl_sequence {
    ($($seq:ident $(: $unique:literal)?),*) => {
        $(
            impl<T: ShapeDescriptor> ShapeDescriptor for $seq<T> {
                fn shape_kind() -> ShapeKind {
                    ShapeKind::Slice
                }

                fn describe(generator: &mut SchemaGenerator) -> OpenApiResult<Schema> {
                    #[allow(unused_mut)]
                    let mut schema = array_of(generator.generate::<T>()?);
                    $(schema.unique_items = Some($unique);)?
                    Ok(schema)
                }
            }
        )*
    };
}

impl_sequence!(Vec, VecDeque, BTreeSet: true);

impl<T: ShapeDescriptor, S> ShapeDescriptor for HashSet<T, S> {
    fn shape_kind() -> ShapeKind {
        ShapeKind::Slice
    }

    fn describe(generator: &mut SchemaGenerator) -> OpenApiResult<Schema> {
        Ok(Schema {
            unique_items: Some(true),
            ..array_of(generator.generate::<T>()?)
        })
    }
}

impl<T: ShapeDescriptor> ShapeDescriptor for [T] {
    fn shape_kind() -> ShapeKind {
        ShapeKind::Slice
    }

    fn describe(generator: &mut SchemaGenerator) -> OpenApiResult<Schema> {
        Ok(array_of(generator.generate::<T>()?))
    }
}

impl<T: ShapeDescriptor, const N: usize> ShapeDescriptor for [T; N] {
    fn shape_kind() -> ShapeKind {
        ShapeKind::Array
    }

    fn describe(generator: &mut SchemaGenerator) -> OpenApiResult<Schema> {
        Ok(Schema {
            min_items: Some(N),
            max_items: Some(N),
            ..array_of(generator.generate::<T>()?)
        })
    }
}

fn map_of(values: Schema) -> Schema {
    Schema {
        schema_type: Some("object".to_string()),
        additional_properties: Some(Box::new(values)),
        ..Default::default()
    }
}

impl<K, V: ShapeDescriptor, S> ShapeDescriptor for HashMap<K, V, S> {
    fn shape_kind() -> ShapeKind {
        ShapeKind::Map
    }

    fn describe(generator: &mut SchemaGenerator) -> OpenApiResult<Schema> {
        Ok(map_of(generator.generate::<V>()?))
    }
}

impl<K, V: ShapeDescriptor> ShapeDescriptor for BTreeMap<K, V> {
    fn shape_kind() -> ShapeKind {
        ShapeKind::Map
    }

    fn describe(generator: &mut SchemaGenerator) -> OpenApiResult<Schema> {
        Ok(map_of(generator.generate::<V>()?))
    }
}
