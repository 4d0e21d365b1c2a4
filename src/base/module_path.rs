//! Dotted Haskell module names.

use smol_str::SmolStr;
use std::fmt;
use std::path::PathBuf;

/// A validated hierarchical module name such as `Data.Map.Strict`.
///
/// Every segment starts with an uppercase letter and continues with
/// identifier characters or `'`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModulePath(SmolStr);

impl ModulePath {
    pub fn parse(text: &str) -> Option<Self> {
        text.split('.')
            .all(is_module_segment)
            .then(|| Self(SmolStr::new(text)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.split('.')
    }

    /// The last segment (`Strict` for `Data.Map.Strict`).
    pub fn last_segment(&self) -> &str {
        self.segments().last().unwrap_or_default()
    }

    /// Enclosing module path, `None` for a single-segment name.
    pub fn parent(&self) -> Option<Self> {
        let (parent, _) = self.0.rsplit_once('.')?;
        Some(Self(SmolStr::new(parent)))
    }

    /// Relative file path of the module (`Data/Map/Strict.hs` for extension `hs`).
    pub fn to_relative_path(&self, extension: &str) -> PathBuf {
        let mut path: PathBuf = self.segments().collect();
        path.set_extension(extension);
        path
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModulePath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

fn is_module_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            chars.all(|c| c == '\'' || unicode_ident::is_xid_continue(c))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Main")]
    #[case("Data.Map.Strict")]
    #[case("Foo'.Bar_2")]
    fn test_valid_module_paths(#[case] text: &str) {
        assert_eq!(ModulePath::parse(text).map(|p| p.to_string()), Some(text.to_string()));
    }

    #[rstest]
    #[case("")]
    #[case("data.Map")]
    #[case("Data..Map")]
    #[case("Data.")]
    #[case(".Data")]
    #[case("Data.Map-Strict")]
    fn test_invalid_module_paths(#[case] text: &str) {
        assert_eq!(ModulePath::parse(text), None);
    }

    #[test]
    fn test_segments_and_parent() {
        let path = ModulePath::parse("Data.Map.Strict").unwrap();
        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["Data", "Map", "Strict"]);
        assert_eq!(path.last_segment(), "Strict");
        assert_eq!(path.parent().unwrap().as_str(), "Data.Map");
        assert_eq!(ModulePath::parse("Main").unwrap().parent(), None);
    }

    #[test]
    fn test_relative_path() {
        let path = ModulePath::parse("Data.Map").unwrap();
        assert_eq!(path.to_relative_path("hs"), PathBuf::from("Data").join("Map.hs"));
    }
}
