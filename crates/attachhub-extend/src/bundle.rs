//! Behavior bundles — immutable sets of named methods attached to a role.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::Value;

use attachhub_core::result::AppResult;

use crate::role::Role;

/// Context passed to a method invocation.
#[derive(Debug, Clone)]
pub struct MethodContext {
    /// The role the method was resolved against.
    pub role: Role,
    /// The receiver's data (typically a serialized file record).
    pub data: Value,
    /// Call arguments.
    pub args: Value,
}

impl MethodContext {
    /// Create a new method context with empty arguments.
    pub fn new(role: Role, data: Value) -> Self {
        Self {
            role,
            data,
            args: Value::Null,
        }
    }

    /// Set the call arguments on this context.
    pub fn with_args(mut self, args: Value) -> Self {
        self.args = args;
        self
    }
}

/// A single named method carried by a behavior bundle.
#[async_trait]
pub trait RoleMethod: Send + Sync + 'static {
    /// The method name instances resolve this method by.
    fn name(&self) -> &str;

    /// Execute the method.
    async fn invoke(&self, context: &mut MethodContext) -> AppResult<Value>;
}

impl std::fmt::Debug for dyn RoleMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleMethod")
            .field("name", &self.name())
            .finish()
    }
}

/// A [`RoleMethod`] backed by a closure, for ad-hoc definitions.
pub struct FnMethod {
    name: String,
    func: Box<dyn for<'a> Fn(&'a mut MethodContext) -> BoxFuture<'a, AppResult<Value>> + Send + Sync>,
}

impl FnMethod {
    /// Create a closure-backed method.
    pub fn new<F>(name: impl Into<String>, func: F) -> Arc<Self>
    where
        F: for<'a> Fn(&'a mut MethodContext) -> BoxFuture<'a, AppResult<Value>>
            + Send
            + Sync
            + 'static,
    {
        Arc::new(Self {
            name: name.into(),
            func: Box::new(func),
        })
    }
}

#[async_trait]
impl RoleMethod for FnMethod {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, context: &mut MethodContext) -> AppResult<Value> {
        (self.func)(context).await
    }
}

/// A named or anonymous set of method definitions.
///
/// Bundles are immutable after construction and shared read-only by every
/// instance of the role they are registered on.
pub struct BehaviorBundle {
    name: Option<String>,
    methods: HashMap<String, Arc<dyn RoleMethod>>,
}

impl BehaviorBundle {
    /// Create an empty anonymous bundle.
    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            name: None,
            methods: HashMap::new(),
        })
    }

    /// Start building an anonymous bundle.
    pub fn builder() -> BundleBuilder {
        BundleBuilder {
            name: None,
            methods: HashMap::new(),
        }
    }

    /// Start building a named bundle.
    pub fn named(name: impl Into<String>) -> BundleBuilder {
        BundleBuilder {
            name: Some(name.into()),
            methods: HashMap::new(),
        }
    }

    /// The bundle name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Look up a method by name.
    pub fn method(&self, name: &str) -> Option<Arc<dyn RoleMethod>> {
        self.methods.get(name).cloned()
    }

    /// The names of all methods this bundle defines.
    pub fn method_names(&self) -> Vec<&str> {
        self.methods.keys().map(String::as_str).collect()
    }

    /// Whether the bundle defines no methods.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl std::fmt::Debug for BehaviorBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorBundle")
            .field("name", &self.name)
            .field("methods", &self.method_names())
            .finish()
    }
}

/// Builder for a [`BehaviorBundle`], the deferred-definition path of
/// module registration.
pub struct BundleBuilder {
    name: Option<String>,
    methods: HashMap<String, Arc<dyn RoleMethod>>,
}

impl BundleBuilder {
    /// Add a method. A later method with the same name replaces an
    /// earlier one within the bundle.
    pub fn method(mut self, method: Arc<dyn RoleMethod>) -> Self {
        self.methods.insert(method.name().to_string(), method);
        self
    }

    /// Add a closure-backed method.
    pub fn method_fn<F>(self, name: impl Into<String>, func: F) -> Self
    where
        F: for<'a> Fn(&'a mut MethodContext) -> BoxFuture<'a, AppResult<Value>>
            + Send
            + Sync
            + 'static,
    {
        self.method(FnMethod::new(name, func))
    }

    /// Finish the bundle.
    pub fn build(self) -> Arc<BehaviorBundle> {
        Arc::new(BehaviorBundle {
            name: self.name,
            methods: self.methods,
        })
    }
}
