use crate::{
    document::Document,
    operation::OperationBuilder,
    specification::{Method, Operation, PathItem},
};

/// Handle to the documentation of one URL path
///
/// Obtained from [`Document::route`]. Handles for the same path all edit the
/// same path item.
#[derive(Debug)]
pub struct Route<'a> {
    doc: &'a mut Document,
    path: String,
}

impl<'a> Route<'a> {
    pub(crate) fn new(doc: &'a mut Document, path: String) -> Self {
        Self { doc, path }
    }

    /// The documented path
    pub fn path(&self) -> &str {
        &self.path
    }

    fn path_item_mut(&mut self) -> Option<&mut PathItem> {
        self.doc.spec.paths.get_mut(&self.path)
    }

    /// Set the summary of the route
    pub fn summary(&mut self, text: &str) -> &mut Self {
        if let Some(item) = self.path_item_mut() {
            item.summary = Some(text.to_string());
        }
        self
    }

    /// Set the description of the route
    pub fn description(&mut self, text: &str) -> &mut Self {
        if let Some(item) = self.path_item_mut() {
            item.description = Some(text.to_string());
        }
        self
    }

    /// Start documenting `method` on this route
    ///
    /// Any operation previously documented for the method is replaced.
    pub fn operation(&mut self, method: Method) -> OperationBuilder<'_> {
        let path = self.path.clone();
        if let Some(item) = self.path_item_mut() {
            if item.set_operation(method, Operation::default()).is_some() {
                tracing::debug!("Replacing {} operation on {}", method, path);
            }
        }

        OperationBuilder::new(&mut *self.doc, path, method)
    }

    /// Document the GET operation
    pub fn get(&mut self) -> OperationBuilder<'_> {
        self.operation(Method::Get)
    }

    /// Document the POST operation
    pub fn post(&mut self) -> OperationBuilder<'_> {
        self.operation(Method::Post)
    }

    /// Document the PUT operation
    pub fn put(&mut self) -> OperationBuilder<'_> {
        self.operation(Method::Put)
    }

    /// Document the PATCH operation
    pub fn patch(&mut self) -> OperationBuilder<'_> {
        self.operation(Method::Patch)
    }

    /// Document the DELETE operation
    pub fn delete(&mut self) -> OperationBuilder<'_> {
        self.operation(Method::Delete)
    }

    /// Document the HEAD operation
    pub fn head(&mut self) -> OperationBuilder<'_> {
        self.operation(Method::Head)
    }

    /// Document the OPTIONS operation
    pub fn options(&mut self) -> OperationBuilder<'_> {
        self.operation(Method::Options)
    }

    /// Document the TRACE operation
    pub fn trace(&mut self) -> OperationBuilder<'_> {
        self.operation(Method::Trace)
    }

    /// Document the CONNECT operation
    ///
    /// OpenAPI 3.0 has no `connect` key; it is emitted only when used.
    pub fn connect(&mut self) -> OperationBuilder<'_> {
        self.operation(Method::Connect)
    }
}
