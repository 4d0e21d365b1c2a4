use super::*;

// ============================================================================
// Root
// ============================================================================

ast_node!(CabalFile, CABAL_FILE);

impl CabalFile {
    node_accessors!(children properties: Property);
    node_accessors!(children executables: Executable);
    node_accessors!(children test_suites: TestSuite);

    /// Generic sections (`library`, `benchmark`, `flag`, `source-repository`, ...)
    pub fn sections(&self) -> impl Iterator<Item = Section> + '_ {
        self.0.children().filter_map(Section::cast)
    }

    /// Value of a top-level field; keys match case-insensitively.
    pub fn field(&self, key: &str) -> Option<PropertyValue> {
        find_field(self.properties(), key)
    }

    /// The `name:` field.
    pub fn package_name(&self) -> Option<String> {
        self.field("name").map(|v| v.text())
    }

    /// The `version:` field.
    pub fn package_version(&self) -> Option<String> {
        self.field("version").map(|v| v.text())
    }

    /// The `library` section, if declared.
    pub fn library(&self) -> Option<Section> {
        self.sections()
            .find(|s| s.type_text().eq_ignore_ascii_case("library"))
    }

    /// Buildable components in document order.
    pub fn components(&self) -> Vec<Component> {
        self.0
            .children()
            .filter_map(|node| {
                let section = AnySection::cast(node)?;
                let kind = ComponentKind::from_section_type(&section.type_text())?;
                Some(Component {
                    kind,
                    name: section.name_text(),
                    source_dirs: section.source_dirs(),
                })
            })
            .collect()
    }
}

fn find_field(mut properties: impl Iterator<Item = Property>, key: &str) -> Option<PropertyValue> {
    properties
        .find(|p| p.key_text().is_some_and(|k| k.eq_ignore_ascii_case(key)))
        .and_then(|p| p.value())
}

// ============================================================================
// Property
// ============================================================================

ast_node!(Property, PROPERTY);

impl Property {
    node_accessors!(first key: PropertyKey);
    node_accessors!(first value: PropertyValue);

    pub fn key_text(&self) -> Option<String> {
        self.key().map(|k| k.text())
    }
}

ast_node!(PropertyKey, PROPERTY_KEY);

impl PropertyKey {
    pub fn text(&self) -> String {
        self.0.text().to_string()
    }
}

ast_node!(PropertyValue, PROPERTY_VALUE);

impl PropertyValue {
    /// Value text with comments dropped, each line trimmed and blank lines removed.
    pub fn text(&self) -> String {
        text_without_comments(&self.0)
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Comma- or line-separated entries (`build-depends`, `exposed-modules`).
    pub fn items(&self) -> Vec<String> {
        self.text()
            .split([',', '\n'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    /// Comma- or whitespace-separated words (`hs-source-dirs`).
    pub fn words(&self) -> Vec<String> {
        self.text()
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

// ============================================================================
// Sections
// ============================================================================

ast_node!(Name, NAME);

impl Name {
    /// Section name with comments dropped and surrounding whitespace trimmed.
    pub fn text(&self) -> String {
        text_without_comments(&self.0).trim().to_string()
    }
}

ast_node!(SectionType, SECTION_TYPE);

impl SectionType {
    pub fn text(&self) -> String {
        self.0.text().to_string()
    }
}

/// Accessors shared by every section-shaped node.
pub trait CabalSection: AstNode {
    fn section_type(&self) -> Option<SectionType> {
        self.syntax().children().find_map(SectionType::cast)
    }

    fn name(&self) -> Option<Name> {
        self.syntax().children().find_map(Name::cast)
    }

    /// Section keyword as written (`executable`, `Library`, `if`, ...)
    fn type_text(&self) -> String {
        self.section_type().map(|t| t.text()).unwrap_or_default()
    }

    fn name_text(&self) -> Option<String> {
        self.name().map(|n| n.text()).filter(|n| !n.is_empty())
    }

    /// Direct properties of this section (not those of nested sections).
    fn properties(&self) -> Vec<Property> {
        self.syntax().children().filter_map(Property::cast).collect()
    }

    /// Nested sections such as `if`/`else` blocks.
    fn subsections(&self) -> Vec<AnySection> {
        self.syntax().children().filter_map(AnySection::cast).collect()
    }

    /// Value of a direct field; keys match case-insensitively.
    fn field(&self, key: &str) -> Option<PropertyValue> {
        find_field(self.properties().into_iter(), key)
    }

    /// `hs-source-dirs` entries, conditional blocks included, in document order.
    fn source_dirs(&self) -> Vec<String> {
        self.syntax()
            .descendants()
            .filter_map(Property::cast)
            .filter(|p| {
                p.key_text().is_some_and(|k| {
                    k.eq_ignore_ascii_case("hs-source-dirs") || k.eq_ignore_ascii_case("hs-source-dir")
                })
            })
            .filter_map(|p| p.value())
            .flat_map(|v| v.words())
            .collect()
    }
}

ast_node!(Executable, EXECUTABLE);
ast_node!(TestSuite, TEST_SUITE);
ast_node!(Section, SECTION);

impl CabalSection for Executable {}
impl CabalSection for TestSuite {}
impl CabalSection for Section {}

impl Executable {
    /// The `main-is:` field.
    pub fn main_is(&self) -> Option<String> {
        self.field("main-is").map(|v| v.text())
    }
}

impl TestSuite {
    /// The `type:` field (`exitcode-stdio-1.0`, `detailed-0.9`).
    pub fn suite_type(&self) -> Option<String> {
        self.field("type").map(|v| v.text())
    }

    /// The `main-is:` field.
    pub fn main_is(&self) -> Option<String> {
        self.field("main-is").map(|v| v.text())
    }
}

/// Any section-shaped node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnySection {
    Executable(Executable),
    TestSuite(TestSuite),
    Section(Section),
}

impl AstNode for AnySection {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::EXECUTABLE | SyntaxKind::TEST_SUITE | SyntaxKind::SECTION
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::EXECUTABLE => Some(Self::Executable(Executable(node))),
            SyntaxKind::TEST_SUITE => Some(Self::TestSuite(TestSuite(node))),
            SyntaxKind::SECTION => Some(Self::Section(Section(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Executable(n) => n.syntax(),
            Self::TestSuite(n) => n.syntax(),
            Self::Section(n) => n.syntax(),
        }
    }
}

impl CabalSection for AnySection {}

// ============================================================================
// Components
// ============================================================================

/// Kind of a buildable component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Library,
    Executable,
    TestSuite,
    Benchmark,
}

impl ComponentKind {
    /// Map a section keyword to a component kind; non-buildable sections yield `None`.
    pub fn from_section_type(section_type: &str) -> Option<Self> {
        match section_type.to_ascii_lowercase().as_str() {
            "library" => Some(Self::Library),
            "executable" => Some(Self::Executable),
            "test-suite" => Some(Self::TestSuite),
            "benchmark" => Some(Self::Benchmark),
            _ => None,
        }
    }
}

/// A buildable component and the source directories it declares
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub kind: ComponentKind,
    pub name: Option<String>,
    /// Relative to the package-description file's directory.
    pub source_dirs: Vec<String>,
}
