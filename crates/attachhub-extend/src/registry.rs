//! Extension registry — role bindings and ordered override resolution.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use attachhub_core::error::AppError;
use attachhub_core::result::AppResult;

use crate::bundle::{BehaviorBundle, BundleBuilder, MethodContext, RoleMethod};
use crate::role::Role;

/// A module definition supplied to [`ExtensionRegistry::register_module`].
///
/// Exactly one of a pre-built bundle or a deferred builder, or neither:
/// `Empty` registers an empty bundle, which succeeds but has no
/// observable effect.
pub enum ModuleDef {
    /// A pre-built bundle.
    Bundle(Arc<BehaviorBundle>),
    /// A deferred definition: the registry hands the closure a fresh
    /// builder and registers whatever it produces.
    Define(Box<dyn FnOnce(BundleBuilder) -> BundleBuilder + Send>),
    /// No definition at all.
    Empty,
}

impl ModuleDef {
    /// Convenience constructor for the deferred-definition variant.
    pub fn define<F>(func: F) -> Self
    where
        F: FnOnce(BundleBuilder) -> BundleBuilder + Send + 'static,
    {
        Self::Define(Box::new(func))
    }
}

impl std::fmt::Debug for ModuleDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bundle(bundle) => f.debug_tuple("Bundle").field(bundle).finish(),
            Self::Define(_) => f.write_str("Define(..)"),
            Self::Empty => f.write_str("Empty"),
        }
    }
}

/// The binding of one role: its base bundle plus registered overlays in
/// registration order.
#[derive(Debug)]
struct RoleBinding {
    /// The role's own method definitions.
    base: Arc<BehaviorBundle>,
    /// Registered overlays, oldest first.
    overlays: Vec<Arc<BehaviorBundle>>,
}

/// Registry of role bindings and their behavior overlays.
///
/// Lifecycle: bind roles and register modules during a single-threaded
/// configuration phase, then [`seal`](Self::seal) the registry and share
/// it (`Arc<ExtensionRegistry>`). A sealed registry rejects every further
/// binding or registration with a configuration error. No locking is
/// provided; mutation requires `&mut self` and therefore cannot race.
#[derive(Debug, Default)]
pub struct ExtensionRegistry {
    /// Role → binding.
    bindings: HashMap<Role, RoleBinding>,
    /// Closed-for-registration flag.
    sealed: bool,
}

impl ExtensionRegistry {
    /// Create a registry with no roles bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a role to its base bundle.
    ///
    /// This is the role→class configuration surface: it must happen once
    /// per role, before any module registration or instantiation for
    /// that role.
    pub fn bind(&mut self, role: Role, base: Arc<BehaviorBundle>) -> AppResult<()> {
        if self.sealed {
            return Err(AppError::configuration(format!(
                "registry is sealed; cannot bind role '{role}'"
            )));
        }
        if self.bindings.contains_key(&role) {
            return Err(AppError::configuration(format!(
                "role '{role}' is already bound"
            )));
        }

        info!(role = %role, base = ?base.name(), "Role bound");
        self.bindings.insert(
            role,
            RoleBinding {
                base,
                overlays: Vec::new(),
            },
        );
        Ok(())
    }

    /// Register a behavior module on a role.
    ///
    /// The module's methods become visible to every instance created
    /// afterwards, overriding the base bundle and any earlier overlay
    /// that defines the same name. Fails with a configuration error if
    /// the role is unbound or the registry is sealed; a failed
    /// registration leaves every binding untouched.
    pub fn register_module(&mut self, role: Role, def: ModuleDef) -> AppResult<()> {
        if self.sealed {
            return Err(AppError::configuration(format!(
                "registry is sealed; cannot register a module on role '{role}'"
            )));
        }

        let binding = self.bindings.get_mut(&role).ok_or_else(|| {
            AppError::configuration(format!("role '{role}' has no bound base bundle"))
        })?;

        let bundle = match def {
            ModuleDef::Bundle(bundle) => bundle,
            ModuleDef::Define(func) => func(BehaviorBundle::builder()).build(),
            ModuleDef::Empty => BehaviorBundle::empty(),
        };

        info!(
            role = %role,
            bundle = ?bundle.name(),
            methods = bundle.method_names().len(),
            "Module registered"
        );
        binding.overlays.push(bundle);
        Ok(())
    }

    /// Close the registry for registration.
    pub fn seal(&mut self) {
        if !self.sealed {
            self.sealed = true;
            info!(roles = self.bindings.len(), "Extension registry sealed");
        }
    }

    /// Whether the registry has been sealed.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Resolve a method on a role.
    ///
    /// Overlays are searched newest-first, then the base bundle, so the
    /// last registered definition of a name wins.
    pub fn resolve(&self, role: Role, method: &str) -> AppResult<Arc<dyn RoleMethod>> {
        let binding = self.binding(role)?;

        for overlay in binding.overlays.iter().rev() {
            if let Some(found) = overlay.method(method) {
                debug!(role = %role, method, bundle = ?overlay.name(), "Method resolved via overlay");
                return Ok(found);
            }
        }

        binding.base.method(method).ok_or_else(|| {
            AppError::not_found(format!("role '{role}' has no method '{method}'"))
        })
    }

    /// The flattened method table for a role: base methods overlaid by
    /// each registered bundle in order.
    pub fn method_table(&self, role: Role) -> AppResult<HashMap<String, Arc<dyn RoleMethod>>> {
        let binding = self.binding(role)?;

        let mut table: HashMap<String, Arc<dyn RoleMethod>> = HashMap::new();
        for name in binding.base.method_names() {
            if let Some(method) = binding.base.method(name) {
                table.insert(name.to_string(), method);
            }
        }
        for overlay in &binding.overlays {
            for name in overlay.method_names() {
                if let Some(method) = overlay.method(name) {
                    table.insert(name.to_string(), method);
                }
            }
        }
        Ok(table)
    }

    /// Create an instance of a role.
    ///
    /// The instance snapshots the role's current method table; modules
    /// registered after instantiation never affect it. For a uniform
    /// view across all instances, register every module before the first
    /// instantiation and seal the registry.
    pub fn instantiate(&self, role: Role) -> AppResult<RoleInstance> {
        let methods = self.method_table(role)?;
        Ok(RoleInstance { role, methods })
    }

    fn binding(&self, role: Role) -> AppResult<&RoleBinding> {
        self.bindings.get(&role).ok_or_else(|| {
            AppError::configuration(format!("role '{role}' has no bound base bundle"))
        })
    }
}

/// One instance of a role's class, holding the method table snapshot
/// taken at construction time.
pub struct RoleInstance {
    role: Role,
    methods: HashMap<String, Arc<dyn RoleMethod>>,
}

impl RoleInstance {
    /// The role this instance was created from.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether the instance resolves the given method name.
    pub fn responds_to(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    /// Invoke a method by name.
    pub async fn call(&self, method: &str, context: &mut MethodContext) -> AppResult<Value> {
        let found = self.methods.get(method).ok_or_else(|| {
            AppError::not_found(format!(
                "role '{}' instance has no method '{method}'",
                self.role
            ))
        })?;
        found.invoke(context).await
    }
}

impl std::fmt::Debug for RoleInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleInstance")
            .field("role", &self.role)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}
