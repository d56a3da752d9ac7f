/// A `name-version` package identifier such as `cfengine-1.5.2nb2`.
///
/// The name is everything before the last hyphen and the version everything
/// after it. An identifier without a hyphen is all name and has no version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackageId<'a> {
    identifier: &'a str,
    name: &'a str,
    version: Option<&'a str>,
}

impl<'a> PackageId<'a> {
    pub fn parse(identifier: &'a str) -> Self {
        match identifier.rsplit_once('-') {
            Some((name, version)) => Self {
                identifier,
                name,
                version: Some(version),
            },
            None => Self {
                identifier,
                name: identifier,
                version: None,
            },
        }
    }

    pub fn as_str(&self) -> &'a str {
        self.identifier
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn version(&self) -> Option<&'a str> {
        self.version
    }
}

impl std::fmt::Display for PackageId<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_last_hyphen() {
        let pkg = PackageId::parse("gnupg-devel-1.9.23");
        assert_eq!(pkg.name(), "gnupg-devel");
        assert_eq!(pkg.version(), Some("1.9.23"));
        assert_eq!(pkg.as_str(), "gnupg-devel-1.9.23");
    }

    #[test]
    fn test_simple_identifier() {
        let pkg = PackageId::parse("cfengine-1.5.2nb2");
        assert_eq!(pkg.name(), "cfengine");
        assert_eq!(pkg.version(), Some("1.5.2nb2"));
    }

    #[test]
    fn test_no_hyphen_has_no_version() {
        let pkg = PackageId::parse("whatever");
        assert_eq!(pkg.name(), "whatever");
        assert_eq!(pkg.version(), None);
    }

    #[test]
    fn test_trailing_hyphen_has_empty_version() {
        let pkg = PackageId::parse("foo-");
        assert_eq!(pkg.name(), "foo");
        assert_eq!(pkg.version(), Some(""));
    }
}
