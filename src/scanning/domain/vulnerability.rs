use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use super::component::Component;

/// The six fixed vulnerability severity levels reported by the
/// vulnerability scanner, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Negligible,
    Unknown,
}

impl Severity {
    pub const ALL: [Severity; 6] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Negligible,
        Severity::Unknown,
    ];

    /// Whether this severity counts towards the "severe CVEs" metric.
    pub fn is_severe(self) -> bool {
        matches!(self, Severity::Critical | Severity::High)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Negligible => "negligible",
            Severity::Unknown => "unknown",
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    /// Case-folded parse. The error carries the offending value so the
    /// normalizer can report it verbatim instead of coercing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            "negligible" => Ok(Severity::Negligible),
            "unknown" => Ok(Severity::Unknown),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A vulnerability reported against a component of an image.
///
/// Identity (equality and hashing) is `(id, component.name,
/// component.version)`, deliberately excluding severity and fix state:
/// the same finding reported twice with drifting severity text between
/// tool versions collapses under set semantics.
#[derive(Debug, Clone, Eq)]
pub struct Vulnerability {
    id: String,
    severity: Severity,
    fix_state: String,
    component: Component,
}

impl Vulnerability {
    pub fn new(id: String, severity: Severity, fix_state: &str, component: Component) -> Self {
        Self {
            id,
            severity,
            fix_state: fix_state.to_lowercase(),
            component,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn fix_state(&self) -> &str {
        &self.fix_state
    }

    pub fn component(&self) -> &Component {
        &self.component
    }

    fn identity(&self) -> (&str, &str, &str) {
        (&self.id, self.component.name(), self.component.version())
    }
}

impl PartialEq for Vulnerability {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Hash for Vulnerability {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn component(name: &str, version: &str) -> Component {
        Component::new(name.to_string(), version.to_string(), "deb")
    }

    #[test]
    fn test_severity_from_str_case_folded() {
        assert_eq!("Critical".parse::<Severity>().unwrap(), Severity::Critical);
        assert_eq!("HIGH".parse::<Severity>().unwrap(), Severity::High);
        assert_eq!("negligible".parse::<Severity>().unwrap(), Severity::Negligible);
    }

    #[test]
    fn test_severity_from_str_unrecognized_carries_value() {
        let error = "catastrophic".parse::<Severity>().unwrap_err();
        assert_eq!(error, "catastrophic");
    }

    #[test]
    fn test_severity_is_severe() {
        assert!(Severity::Critical.is_severe());
        assert!(Severity::High.is_severe());
        assert!(!Severity::Medium.is_severe());
        assert!(!Severity::Unknown.is_severe());
    }

    #[test]
    fn test_vulnerability_identity_excludes_severity_and_fix_state() {
        let a = Vulnerability::new(
            "CVE-2024-1234".to_string(),
            Severity::High,
            "fixed",
            component("openssl", "3.0.13"),
        );
        let b = Vulnerability::new(
            "CVE-2024-1234".to_string(),
            Severity::Medium,
            "not-fixed",
            component("openssl", "3.0.13"),
        );
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b), "same identity must hash to the same entry");
    }

    #[test]
    fn test_vulnerability_identity_includes_component_version() {
        let a = Vulnerability::new(
            "CVE-2024-1234".to_string(),
            Severity::High,
            "fixed",
            component("openssl", "3.0.13"),
        );
        let b = Vulnerability::new(
            "CVE-2024-1234".to_string(),
            Severity::High,
            "fixed",
            component("openssl", "3.0.14"),
        );
        assert_ne!(a, b);
    }

    #[test]
    fn test_fix_state_is_case_folded() {
        let vuln = Vulnerability::new(
            "CVE-2024-1234".to_string(),
            Severity::Low,
            "Won't-Fix",
            component("zlib", "1.3"),
        );
        assert_eq!(vuln.fix_state(), "won't-fix");
    }
}
