/*!
Content-type inference for request bodies.

A coarse, fixed heuristic: structured shapes travel as JSON, everything else
as raw bytes.
*/

use crate::shape::{ShapeDescriptor, ShapeKind};

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

/// Content type for a shape kind
pub fn content_type_for(kind: ShapeKind) -> &'static str {
    if kind.is_json() {
        APPLICATION_JSON
    } else {
        APPLICATION_OCTET_STREAM
    }
}

/// Content type used when documenting a body of type `T`
pub fn content_type<T: ShapeDescriptor + ?Sized>() -> &'static str {
    content_type_for(T::shape_kind())
}

/// Same as [`content_type`], inferring `T` from a sample value
pub fn content_type_of_val<T: ShapeDescriptor + ?Sized>(_sample: &T) -> &'static str {
    content_type::<T>()
}
