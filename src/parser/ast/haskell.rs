use super::*;
use crate::base::ModulePath;
use rowan::GreenNodeBuilder;

// ============================================================================
// Root
// ============================================================================

ast_node!(HaskellFile, HASKELL_FILE);

impl HaskellFile {
    node_accessors!(children imports: Import);
    node_accessors!(descendants constructors: ConstructorName);
    node_accessors!(descendants module_names: ModuleName);

    /// Name declared by the `module ... where` header.
    pub fn module_name(&self) -> Option<ModuleName> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::MODULE_HEADER)?
            .children()
            .find_map(ModuleName::cast)
    }
}

// ============================================================================
// Import
// ============================================================================

ast_node!(Import, IMPORT_DECL);

impl Import {
    node_accessors!(first module_name: ModuleName);
    node_accessors!(after AS_KW alias: ModuleName);
    node_accessors!(flag is_qualified: QUALIFIED_KW);
    node_accessors!(flag is_hiding: HIDING_KW);
}

// ============================================================================
// Named elements
// ============================================================================

/// A syntax element that carries a name.
pub trait NamedElement {
    /// The element's exact source text.
    fn name(&self) -> String;

    /// Rename the element, returning the root of a new tree.
    ///
    /// The tree this element belongs to is left untouched.
    fn set_name(&self, name: &str) -> Result<SyntaxNode, ElementError>;
}

ast_node!(ConstructorName, CONSTRUCTOR_NAME);

impl NamedElement for ConstructorName {
    fn name(&self) -> String {
        self.0.text().to_string()
    }

    fn set_name(&self, _name: &str) -> Result<SyntaxNode, ElementError> {
        Err(ElementError::UnsupportedOperation {
            kind: SyntaxKind::CONSTRUCTOR_NAME.debug_name(),
            operation: "rename",
        })
    }
}

ast_node!(ModuleName, MODULE_NAME);

impl ModuleName {
    /// The validated module path, `None` if the text is not a well-formed module name.
    pub fn module_path(&self) -> Option<ModulePath> {
        ModulePath::parse(&self.name())
    }
}

impl NamedElement for ModuleName {
    fn name(&self) -> String {
        self.0.text().to_string()
    }

    fn set_name(&self, name: &str) -> Result<SyntaxNode, ElementError> {
        let path = ModulePath::parse(name).ok_or_else(|| ElementError::InvalidName(name.to_string()))?;

        let mut builder = GreenNodeBuilder::new();
        builder.start_node(SyntaxKind::MODULE_NAME.into());
        for (i, segment) in path.segments().enumerate() {
            if i > 0 {
                builder.token(SyntaxKind::DOT.into(), ".");
            }
            builder.token(SyntaxKind::CON_ID.into(), segment);
        }
        builder.finish_node();

        Ok(SyntaxNode::new_root(self.0.replace_with(builder.finish())))
    }
}
