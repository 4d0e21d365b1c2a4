//! Composite kind registry
//!
//! Every non-terminal kind is described by a [`CompositeKind`]: a debug name
//! plus an optional constructor turning a raw [`SyntaxNode`] into a typed
//! [`Element`]. Kinds registered without a constructor get the pass-through
//! [`PlainElement`](super::ast::PlainElement) wrapper.

use super::ast::{Element, builtin_constructor, plain};
use super::syntax_kind::{SyntaxKind, SyntaxNode};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::sync::LazyLock;
use thiserror::Error;

/// Builds a typed element from a raw node of the matching kind.
pub type ElementConstructor = fn(SyntaxNode) -> Element;

/// Errors raised while registering composite kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("composite kind {0:?} registered with an empty debug name")]
    EmptyDebugName(SyntaxKind),

    #[error("debug name {0:?} is already registered")]
    DuplicateDebugName(&'static str),

    #[error("kind {0:?} is already registered")]
    DuplicateKind(SyntaxKind),

    #[error("kind {0:?} is a token, not a composite")]
    NotComposite(SyntaxKind),
}

/// Descriptor of a composite (non-terminal) syntax kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeKind {
    kind: SyntaxKind,
    debug_name: &'static str,
    constructor: Option<ElementConstructor>,
}

impl CompositeKind {
    /// A kind wrapped by the default pass-through element.
    pub const fn new(kind: SyntaxKind, debug_name: &'static str) -> Self {
        Self {
            kind,
            debug_name,
            constructor: None,
        }
    }

    #[must_use]
    pub const fn with_constructor(mut self, constructor: ElementConstructor) -> Self {
        self.constructor = Some(constructor);
        self
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// The name given at registration, verbatim.
    pub fn debug_name(&self) -> &'static str {
        self.debug_name
    }

    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    /// Wrap `node` as a typed element.
    ///
    /// Pure: the node is neither copied nor mutated, so the same node always
    /// yields an equal element.
    pub fn create(&self, node: SyntaxNode) -> Element {
        debug_assert_eq!(node.kind(), self.kind);
        match self.constructor {
            Some(constructor) => constructor(node),
            None => plain(node),
        }
    }
}

/// Registry of composite kinds keyed by kind and by debug name
#[derive(Debug, Default)]
pub struct KindRegistry {
    kinds: IndexMap<SyntaxKind, CompositeKind>,
    names: FxHashMap<&'static str, SyntaxKind>,
}

impl KindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a composite kind.
    ///
    /// The debug name must be non-empty and unique, and each kind may be
    /// registered once.
    pub fn register(&mut self, composite: CompositeKind) -> Result<(), RegistryError> {
        if !composite.kind.is_composite() {
            return Err(RegistryError::NotComposite(composite.kind));
        }
        if composite.debug_name.is_empty() {
            return Err(RegistryError::EmptyDebugName(composite.kind));
        }
        if self.kinds.contains_key(&composite.kind) {
            return Err(RegistryError::DuplicateKind(composite.kind));
        }
        if self.names.contains_key(composite.debug_name) {
            return Err(RegistryError::DuplicateDebugName(composite.debug_name));
        }
        self.names.insert(composite.debug_name, composite.kind);
        self.kinds.insert(composite.kind, composite);
        Ok(())
    }

    pub fn get(&self, kind: SyntaxKind) -> Option<&CompositeKind> {
        self.kinds.get(&kind)
    }

    pub fn by_name(&self, debug_name: &str) -> Option<&CompositeKind> {
        self.names.get(debug_name).and_then(|kind| self.kinds.get(kind))
    }

    /// Wrap `node` with the constructor registered for its kind.
    pub fn create(&self, node: SyntaxNode) -> Option<Element> {
        let composite = self.get(node.kind())?;
        Some(composite.create(node))
    }

    /// Registered kinds in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CompositeKind> + '_ {
        self.kinds.values()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

const BUILTIN_KINDS: &[(SyntaxKind, &str)] = &[
    // Cabal
    (SyntaxKind::CABAL_FILE, "CABAL_FILE"),
    (SyntaxKind::PROPERTY, "PROPERTY"),
    (SyntaxKind::NAME, "NAME"),
    (SyntaxKind::PROPERTY_KEY, "PROPERTY_KEY"),
    (SyntaxKind::PROPERTY_VALUE, "PROPERTY_VALUE"),
    (SyntaxKind::EXECUTABLE, "EXECUTABLE"),
    (SyntaxKind::TEST_SUITE, "TEST_SUITE"),
    (SyntaxKind::SECTION, "SECTION"),
    (SyntaxKind::SECTION_TYPE, "SECTION_TYPE"),
    // Haskell
    (SyntaxKind::HASKELL_FILE, "HASKELL_FILE"),
    (SyntaxKind::MODULE_HEADER, "MODULE_HEADER"),
    (SyntaxKind::IMPORT_DECL, "IMPORT_DECL"),
    (SyntaxKind::DATA_DECL, "DATA_DECL"),
    (SyntaxKind::CONSTRUCTOR_NAME, "CONSTRUCTOR_NAME"),
    (SyntaxKind::MODULE_NAME, "MODULE_NAME"),
];

static REGISTRY: LazyLock<KindRegistry> = LazyLock::new(|| {
    let mut registry = KindRegistry::new();
    for &(kind, name) in BUILTIN_KINDS {
        let composite = match builtin_constructor(kind) {
            Some(constructor) => CompositeKind::new(kind, name).with_constructor(constructor),
            None => CompositeKind::new(kind, name),
        };
        if let Err(err) = registry.register(composite) {
            tracing::error!("built-in composite kind rejected: {}", err);
        }
    }
    registry
});

/// The process-wide registry of built-in composite kinds.
pub fn registry() -> &'static KindRegistry {
    &REGISTRY
}
