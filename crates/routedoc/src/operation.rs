use crate::{
    content::{content_type, APPLICATION_JSON},
    document::Document,
    naming,
    param::Param,
    shape::{ShapeDescriptor, ShapeKind},
    specification::{MediaType, Method, Operation, RequestBody, Response},
};
use std::collections::BTreeMap;

/// Handle to one operation (method) on a documented route
///
/// Returned by [`Route::get`](crate::route::Route::get) and friends. Methods
/// take and return the handle by value so a chain reads top to bottom;
/// [`deprecated`](Self::deprecated) consumes it and ends the chain.
#[derive(Debug)]
pub struct OperationBuilder<'a> {
    doc: &'a mut Document,
    path: String,
    method: Method,
}

impl<'a> OperationBuilder<'a> {
    pub(crate) fn new(doc: &'a mut Document, path: String, method: Method) -> Self {
        Self { doc, path, method }
    }

    /// HTTP method this handle documents
    pub fn method(&self) -> Method {
        self.method
    }

    fn operation_mut(&mut self) -> Option<&mut Operation> {
        let method = self.method;
        self.doc
            .spec
            .paths
            .get_mut(&self.path)
            .and_then(|item| item.operation_mut(method))
    }

    /// Set the tags of the operation, replacing earlier ones
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(operation) = self.operation_mut() {
            operation.tags = tags.into_iter().map(Into::into).collect();
        }
        self
    }

    /// Set the summary of the operation
    ///
    /// Also derives the operation ID from the summary unless one is set.
    pub fn summary(mut self, text: &str) -> Self {
        let casing = self.doc.casing;
        if let Some(operation) = self.operation_mut() {
            operation.summary = Some(text.to_string());
            if operation.operation_id.is_none() {
                let id = naming::operation_id(text, casing);
                if !id.is_empty() {
                    operation.operation_id = Some(id);
                }
            }
        }
        self
    }

    /// Set an explicit operation ID
    pub fn operation_id(mut self, id: &str) -> Self {
        if let Some(operation) = self.operation_mut() {
            operation.operation_id = Some(id.to_string());
        }
        self
    }

    /// Set the description of the operation
    pub fn description(mut self, text: &str) -> Self {
        if let Some(operation) = self.operation_mut() {
            operation.description = Some(text.to_string());
        }
        self
    }

    /// Document the request body as `T`
    ///
    /// Ignored for GET. The content type comes from `T`'s shape kind and the
    /// new body replaces any earlier one.
    pub fn body<T: ShapeDescriptor + ?Sized>(mut self) -> Self {
        if self.method == Method::Get {
            tracing::warn!("Ignoring request body on GET {}", self.path);
            return self;
        }
        if T::shape_kind() == ShapeKind::Empty {
            tracing::debug!("No request body to document for {} {}", self.method, self.path);
            return self;
        }

        let schema = match self.doc.schemas.generate::<T>() {
            Ok(schema) => schema,
            Err(err) => {
                tracing::warn!(
                    "Skipping request body for {} {}: {}",
                    self.method,
                    self.path,
                    err
                );
                return self;
            }
        };

        let mut content = BTreeMap::new();
        content.insert(
            content_type::<T>().to_string(),
            MediaType {
                schema: Some(schema),
            },
        );

        if let Some(operation) = self.operation_mut() {
            operation.request_body = Some(RequestBody {
                description: None,
                content,
                required: None,
            });
        }
        self
    }

    /// Document the response for `status` as `T`
    ///
    /// Registering the same status again replaces the earlier response.
    /// `T = ()` documents a response without content.
    pub fn response<T: ShapeDescriptor + ?Sized>(mut self, status: u16) -> Self {
        let mut content = BTreeMap::new();

        if T::shape_kind() != ShapeKind::Empty {
            let schema = match self.doc.schemas.generate::<T>() {
                Ok(schema) => schema,
                Err(err) => {
                    tracing::warn!(
                        "Skipping {} response for {} {}: {}",
                        status,
                        self.method,
                        self.path,
                        err
                    );
                    return self;
                }
            };
            content.insert(
                APPLICATION_JSON.to_string(),
                MediaType {
                    schema: Some(schema),
                },
            );
        }

        if let Some(operation) = self.operation_mut() {
            operation.responses.insert(
                status.to_string(),
                Response {
                    description: status_description(status).to_string(),
                    content,
                },
            );
        }
        self
    }

    /// Attach parameters in order
    ///
    /// Parameters are appended as given; two parameters with the same name
    /// and location are both kept.
    pub fn params<I>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = Param>,
    {
        for param in params {
            let name = param.name().to_string();
            match param.into_parameter(&mut self.doc.schemas) {
                Ok(parameter) => {
                    if let Some(operation) = self.operation_mut() {
                        operation.parameters.push(parameter);
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        "Skipping parameter {} for {} {}: {}",
                        name,
                        self.method,
                        self.path,
                        err
                    );
                }
            }
        }
        self
    }

    /// Mark the operation as deprecated
    ///
    /// Ends the chain: the handle is consumed.
    pub fn deprecated(mut self) {
        if let Some(operation) = self.operation_mut() {
            operation.deprecated = Some(true);
        }
    }
}

/// Reason phrase used as the response description
fn status_description(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        301 => "Moved Permanently",
        302 => "Found",
        304 => "Not Modified",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Response",
    }
}
