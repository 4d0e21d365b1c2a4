use super::*;
use crate::parser::kinds::registry;
use thiserror::Error;

/// Errors raised by operations on typed elements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElementError {
    /// The element kind does not support the operation.
    #[error("{operation} is not supported on {kind}")]
    UnsupportedOperation {
        kind: &'static str,
        operation: &'static str,
    },

    /// The replacement name is not valid for the element.
    #[error("invalid name: {0:?}")]
    InvalidName(String),
}

/// Pass-through wrapper for composite kinds registered without a constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlainElement(pub(crate) SyntaxNode);

impl PlainElement {
    pub fn syntax(&self) -> &SyntaxNode {
        &self.0
    }

    /// Typed elements among the direct children.
    pub fn child_elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.0.children().filter_map(Element::cast)
    }
}

/// A typed element selected by its composite kind's constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Element {
    CabalFile(CabalFile),
    Property(Property),
    Name(Name),
    PropertyKey(PropertyKey),
    PropertyValue(PropertyValue),
    Executable(Executable),
    TestSuite(TestSuite),
    Section(Section),
    SectionType(SectionType),
    HaskellFile(HaskellFile),
    Import(Import),
    ConstructorName(ConstructorName),
    ModuleName(ModuleName),
    Plain(PlainElement),
}

impl Element {
    /// Wrap a raw node using the constructor registered for its kind.
    ///
    /// Returns `None` for kinds that are not registered composites.
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        registry().create(node)
    }

    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::CabalFile(n) => n.syntax(),
            Self::Property(n) => n.syntax(),
            Self::Name(n) => n.syntax(),
            Self::PropertyKey(n) => n.syntax(),
            Self::PropertyValue(n) => n.syntax(),
            Self::Executable(n) => n.syntax(),
            Self::TestSuite(n) => n.syntax(),
            Self::Section(n) => n.syntax(),
            Self::SectionType(n) => n.syntax(),
            Self::HaskellFile(n) => n.syntax(),
            Self::Import(n) => n.syntax(),
            Self::ConstructorName(n) => n.syntax(),
            Self::ModuleName(n) => n.syntax(),
            Self::Plain(n) => n.syntax(),
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.syntax().kind()
    }

    /// Source text covered by the element.
    pub fn text(&self) -> String {
        self.syntax().text().to_string()
    }

    /// The element as a named element, for kinds that carry a name.
    pub fn as_named(&self) -> Option<&dyn NamedElement> {
        match self {
            Self::ConstructorName(n) => Some(n),
            Self::ModuleName(n) => Some(n),
            _ => None,
        }
    }
}

/// Constructors for the built-in composite kinds.
pub(crate) fn builtin_constructor(kind: SyntaxKind) -> Option<fn(SyntaxNode) -> Element> {
    let constructor: fn(SyntaxNode) -> Element = match kind {
        SyntaxKind::CABAL_FILE => |n| Element::CabalFile(CabalFile(n)),
        SyntaxKind::PROPERTY => |n| Element::Property(Property(n)),
        SyntaxKind::NAME => |n| Element::Name(Name(n)),
        SyntaxKind::PROPERTY_KEY => |n| Element::PropertyKey(PropertyKey(n)),
        SyntaxKind::PROPERTY_VALUE => |n| Element::PropertyValue(PropertyValue(n)),
        SyntaxKind::EXECUTABLE => |n| Element::Executable(Executable(n)),
        SyntaxKind::TEST_SUITE => |n| Element::TestSuite(TestSuite(n)),
        SyntaxKind::SECTION => |n| Element::Section(Section(n)),
        SyntaxKind::SECTION_TYPE => |n| Element::SectionType(SectionType(n)),
        SyntaxKind::HASKELL_FILE => |n| Element::HaskellFile(HaskellFile(n)),
        SyntaxKind::IMPORT_DECL => |n| Element::Import(Import(n)),
        SyntaxKind::CONSTRUCTOR_NAME => |n| Element::ConstructorName(ConstructorName(n)),
        SyntaxKind::MODULE_NAME => |n| Element::ModuleName(ModuleName(n)),
        _ => return None,
    };
    Some(constructor)
}

pub(crate) fn plain(node: SyntaxNode) -> Element {
    Element::Plain(PlainElement(node))
}
