#![allow(clippy::unwrap_used, clippy::expect_used)]

#[path = "helpers/fixtures.rs"]
mod fixtures;

use fixtures::PACKAGE_DESCRIPTION;
use hscabal::parser::{
    AstNode, CabalFile, CabalSection, ComponentKind, Element, HaskellFile, SyntaxKind,
    parse_cabal, parse_haskell,
};
use hscabal::{ModulePath, NamedElement};

const HASKELL_MODULE: &str = "\
{-# LANGUAGE GADTs #-}
module Demo.Core
  ( Shape(..)
  , area
  ) where

import Prelude hiding (lookup)
import qualified Data.Map.Strict as Map
import Demo.Util (clamp)

-- | Plane figures.
data Shape
  = Circle Double
  | Rect { width :: Double, height :: Double }
  deriving (Show, Eq)

newtype Name = Name String

data Expr a where
  Lit  :: Int -> Expr Int
  Pair :: Expr a -> Expr b -> Expr (a, b)

area :: Shape -> Double
area (Circle r) = pi * r * r
area (Rect w h) = clamp 0 (w * h)
";

#[test]
fn test_package_description_end_to_end() {
    let parse = parse_cabal(PACKAGE_DESCRIPTION);
    assert!(parse.ok(), "{:?}", parse.errors);
    assert_eq!(parse.syntax().text().to_string(), PACKAGE_DESCRIPTION);

    let file = CabalFile::cast(parse.syntax()).unwrap();
    assert_eq!(file.package_name().as_deref(), Some("demo"));
    assert_eq!(file.package_version().as_deref(), Some("0.1.0.0"));

    let library = file.library().unwrap();
    assert_eq!(
        library.field("exposed-modules").unwrap().items(),
        vec!["Demo.Core", "Demo.Util"]
    );
    assert_eq!(
        library.field("build-depends").unwrap().items(),
        vec!["base >=4.7 && <5", "containers"]
    );

    let executable = file.executables().next().unwrap();
    assert_eq!(executable.name_text().as_deref(), Some("demo"));
    assert_eq!(executable.main_is().as_deref(), Some("Main.hs"));

    let suite = file.test_suites().next().unwrap();
    assert_eq!(suite.suite_type().as_deref(), Some("exitcode-stdio-1.0"));

    let kinds: Vec<ComponentKind> = file.components().iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![ComponentKind::Library, ComponentKind::Executable, ComponentKind::TestSuite]
    );
}

#[test]
fn test_cabal_elements_dispatch_by_kind() {
    let root = parse_cabal(PACKAGE_DESCRIPTION).syntax();
    let elements: Vec<Element> = root.descendants().filter_map(Element::cast).collect();

    assert!(elements.iter().any(|e| matches!(e, Element::Executable(_))));
    assert!(elements.iter().any(|e| matches!(e, Element::TestSuite(_))));
    assert!(elements.iter().any(|e| e.kind() == SyntaxKind::PROPERTY_KEY));
    assert!(elements.iter().all(|e| e.as_named().is_none()));
}

#[test]
fn test_haskell_module_end_to_end() {
    let parse = parse_haskell(HASKELL_MODULE);
    assert!(parse.ok(), "{:?}", parse.errors);
    assert_eq!(parse.syntax().text().to_string(), HASKELL_MODULE);

    let file = HaskellFile::cast(parse.syntax()).unwrap();
    assert_eq!(file.module_name().unwrap().name(), "Demo.Core");

    let imports: Vec<_> = file.imports().collect();
    assert_eq!(imports.len(), 3);
    assert!(imports[0].is_hiding());
    assert!(imports[1].is_qualified());
    assert_eq!(imports[1].alias().unwrap().name(), "Map");
    assert_eq!(
        imports[2].module_name().unwrap().module_path(),
        ModulePath::parse("Demo.Util")
    );

    let constructors: Vec<String> = file.constructors().map(|c| c.name()).collect();
    assert_eq!(constructors, vec!["Circle", "Rect", "Name", "Lit", "Pair"]);
}

#[test]
fn test_rename_import_leaves_original_tree() {
    let parse = parse_haskell(HASKELL_MODULE);
    let file = HaskellFile::cast(parse.syntax()).unwrap();
    let util = file.imports().nth(2).unwrap().module_name().unwrap();

    let renamed = util.set_name("Demo.Helpers").unwrap();
    let text = renamed.text().to_string();
    assert!(text.contains("import Demo.Helpers (clamp)"));
    assert!(!text.contains("Demo.Util"));
    assert_eq!(parse.syntax().text().to_string(), HASKELL_MODULE);
}

#[test]
fn test_named_elements_through_dispatch() {
    let root = parse_haskell(HASKELL_MODULE).syntax();
    let names: Vec<String> = root
        .descendants()
        .filter_map(Element::cast)
        .filter_map(|e| e.as_named().map(|n| n.name()))
        .collect();

    assert_eq!(names.first().map(String::as_str), Some("Demo.Core"));
    assert!(names.iter().any(|n| n == "Data.Map.Strict"));
    assert!(names.iter().any(|n| n == "Pair"));
}
