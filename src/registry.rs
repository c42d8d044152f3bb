//! # Registry
//!
//! A value-level snapshot of the compile-time facts, for consumers that
//! dispatch on [`TypeId`]. Build it once at start-up, optionally install it
//! globally, then query it from anywhere:
//!
//! ```
//! use tola_shape::registry::Registry;
//! use tola_shape::type_info;
//!
//! let registry = Registry::builder()
//!     .register(type_info!(Vec<u8>))
//!     .register(type_info!(fn(i32, i32) -> i32, callable))
//!     .build();
//!
//! assert!(registry.detect::<Vec<u8>>("value_type").unwrap());
//! assert_eq!(registry.signature::<fn(i32, i32) -> i32>().unwrap().to_string(), "fn(i32, i32) -> i32");
//! ```

use core::any::{type_name, TypeId};
use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::{debug, info, warn};

use crate::callable::{CallShape, Callable, SignatureInfo};
use crate::detect::{CapabilityName, CapabilitySet, Introspect};
use crate::error::{IntrospectError, Result};
use crate::rebind::RebindRule;
use crate::shape::{classify, Classification};

// =============================================================================
// TypeInfo
// =============================================================================

/// Everything the engine knows about one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    name: &'static str,
    id: TypeId,
    types: CapabilitySet,
    values: CapabilitySet,
    slots: Option<usize>,
    call: CallShape,
    rebind: RebindRule,
    classification: Classification,
    insertable: bool,
    extractable: bool,
    signature: Option<SignatureInfo>,
    arity: Option<usize>,
}

impl TypeInfo {
    pub fn of<T: Introspect + ?Sized + 'static>() -> Self {
        TypeInfo {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
            types: T::TYPES,
            values: T::VALUES,
            slots: T::SLOTS,
            call: T::CALL,
            rebind: T::REBIND,
            classification: classify::<T>(),
            insertable: false,
            extractable: false,
            signature: None,
            arity: None,
        }
    }

    /// Record the normalized signature and arity.
    pub fn with_signature<T: Callable + ?Sized>(mut self) -> Self {
        self.signature = Some(SignatureInfo::of::<T::Signature>());
        self.arity = Some(T::ARITY);
        self
    }

    /// Record the stream probes; see [`type_info!`](crate::type_info).
    pub fn with_streams(mut self, insertable: bool, extractable: bool) -> Self {
        self.insertable = insertable;
        self.extractable = extractable;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn members(&self) -> CapabilitySet {
        self.types.union(self.values)
    }

    /// Member-style: alias or named value.
    pub fn detect(&self, name: CapabilityName) -> bool {
        self.members().contains(name)
    }

    /// Typedef-style: alias only.
    pub fn detect_typedef(&self, name: CapabilityName) -> bool {
        self.types.contains(name)
    }

    pub fn slots(&self) -> Option<usize> {
        self.slots
    }

    pub fn call_shape(&self) -> CallShape {
        self.call
    }

    pub fn rebind_rule(&self) -> RebindRule {
        self.rebind
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn can_insert(&self) -> bool {
        self.insertable
    }

    pub fn can_extract(&self) -> bool {
        self.extractable
    }

    /// The normalized signature.
    ///
    /// Fails with [`IntrospectError::IndeterminateCallable`] for types with
    /// several call operators.
    pub fn signature(&self) -> Result<&SignatureInfo> {
        match self.call {
            CallShape::NotCallable => Err(IntrospectError::NotCallable { entity: self.name }),
            CallShape::Overloaded(overloads) => Err(IntrospectError::IndeterminateCallable {
                entity: self.name,
                overloads,
            }),
            CallShape::Declared | CallShape::Operator | CallShape::Function => self
                .signature
                .as_ref()
                .ok_or(IntrospectError::MissingSignature { entity: self.name }),
        }
    }

    /// Declared `arity_value` if any, otherwise the parameter count.
    pub fn arity(&self) -> Result<usize> {
        let signature = self.signature()?;
        Ok(self.arity.unwrap_or(signature.arity()))
    }

    pub fn return_type(&self) -> Result<&'static str> {
        Ok(self.signature()?.return_type())
    }

    pub fn drop_leading(&self, n: usize) -> Result<SignatureInfo> {
        self.signature()?.drop_leading(n)
    }
}

/// Build a [`TypeInfo`] for a concrete type, including the stream probes.
///
/// Append `, callable` to record the signature as well.
#[macro_export]
macro_rules! type_info {
    ($T:ty, callable) => {
        $crate::type_info!($T).with_signature::<$T>()
    };
    ($T:ty) => {
        $crate::registry::TypeInfo::of::<$T>()
            .with_streams($crate::can_insert!($T), $crate::can_extract!($T))
    };
}

// =============================================================================
// Registry
// =============================================================================

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: HashMap<TypeId, TypeInfo>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type. A second registration of the same type replaces the first.
    pub fn register(mut self, info: TypeInfo) -> Self {
        debug!(
            name = info.name(),
            shape = %info.classification(),
            members = ?info.members(),
            "registering type"
        );
        let name = info.name();
        if self.entries.insert(info.id(), info).is_some() {
            warn!(name, "type registered twice, keeping the later registration");
        }
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            entries: self.entries,
        }
    }
}

/// Immutable map from [`TypeId`] to [`TypeInfo`].
#[derive(Debug, Default)]
pub struct Registry {
    entries: HashMap<TypeId, TypeInfo>,
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn get<T: ?Sized + 'static>(&self) -> Result<&TypeInfo> {
        self.get_by_id(TypeId::of::<T>())
            .ok_or(IntrospectError::NotRegistered(type_name::<T>()))
    }

    pub fn get_by_id(&self, id: TypeId) -> Option<&TypeInfo> {
        self.entries.get(&id)
    }

    /// Member-style detection by capability spelling.
    pub fn detect<T: ?Sized + 'static>(&self, name: &str) -> Result<bool> {
        let name: CapabilityName = name.parse()?;
        Ok(self.get::<T>()?.detect(name))
    }

    pub fn classify<T: ?Sized + 'static>(&self) -> Result<Classification> {
        Ok(self.get::<T>()?.classification())
    }

    pub fn signature<T: ?Sized + 'static>(&self) -> Result<&SignatureInfo> {
        self.get::<T>()?.signature()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeInfo> {
        self.entries.values()
    }

    /// Install as the process-wide registry. Only the first call succeeds.
    pub fn install(self) -> Result<&'static Registry> {
        let count = self.len();
        let mut installed = false;
        let registry = GLOBAL.get_or_init(|| {
            installed = true;
            self
        });
        if !installed {
            return Err(IntrospectError::AlreadyInstalled);
        }
        info!(types = count, "installed global type registry");
        Ok(registry)
    }

    pub fn global() -> Option<&'static Registry> {
        GLOBAL.get()
    }
}
