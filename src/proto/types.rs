use serde::Serialize;

use crate::naming::handler_file_name;

/// One unary RPC method found in a service interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceMethod {
    /// Go method name (e.g., `CreateCourse`)
    pub name: String,
    /// Request message type, without the pointer (e.g., `CreateCourseRequest`)
    pub request_type: String,
    /// Response message type, without the pointer
    pub response_type: String,
    /// Handler file name derived from the method name (`rpc_create_course.go`)
    pub file_name: String,
}

impl ServiceMethod {
    pub fn new(
        name: impl Into<String>,
        request_type: impl Into<String>,
        response_type: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let file_name = handler_file_name(&name);
        Self {
            name,
            request_type: request_type.into(),
            response_type: response_type.into(),
            file_name,
        }
    }
}

/// An exported interface method whose signature is not unary request/response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedMethod {
    /// Go method name
    pub name: String,
    /// Trimmed source line
    pub signature: String,
}

/// Result of scanning one or more interface files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    /// Unary methods in declaration order
    pub methods: Vec<ServiceMethod>,
    /// Methods of an unsupported shape, in declaration order
    pub skipped: Vec<SkippedMethod>,
    /// Number of `<Name>Server interface` blocks seen
    pub interfaces: usize,
}

impl Extraction {
    pub(crate) fn merge(&mut self, other: Extraction) {
        self.methods.extend(other.methods);
        self.skipped.extend(other.skipped);
        self.interfaces += other.interfaces;
    }
}
