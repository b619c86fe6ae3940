/// A software component discovered in an image by the inventory scanner.
///
/// `kind` is the component's package/ecosystem classification as reported
/// by the tool (`deb`, `npm`, `python`, ...), case-folded to lowercase.
/// Two components are equal iff all three fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Component {
    name: String,
    version: String,
    kind: String,
}

impl Component {
    pub fn new(name: String, version: String, kind: &str) -> Self {
        Self {
            name,
            version,
            kind: kind.to_lowercase(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_kind_is_case_folded() {
        let component = Component::new("openssl".to_string(), "3.0.13".to_string(), "Deb");
        assert_eq!(component.kind(), "deb");
    }

    #[test]
    fn test_component_equality_is_all_three_fields() {
        let a = Component::new("openssl".to_string(), "3.0.13".to_string(), "deb");
        let b = Component::new("openssl".to_string(), "3.0.13".to_string(), "deb");
        let c = Component::new("openssl".to_string(), "3.0.14".to_string(), "deb");
        let d = Component::new("openssl".to_string(), "3.0.13".to_string(), "apk");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }
}
