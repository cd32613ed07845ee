//! Deployable stack kinds.

use serde::{Deserialize, Serialize};

/// A deployable stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum StackType {
    /// Shared infrastructure (user pool, tables).
    #[value(name = "Shared")]
    Shared,
    /// Static asset buckets.
    #[value(name = "S3")]
    S3,
    /// The CloudWatch Live application stack.
    #[value(name = "CWL")]
    #[serde(rename = "CWL")]
    Cwl,
}

impl StackType {
    /// Every stack, in declaration order.
    pub const ALL: [Self; 3] = [Self::Shared, Self::S3, Self::Cwl];

    /// Order in which stacks are removed; dependents go first.
    pub const REMOVAL_ORDER: [Self; 3] = [Self::Cwl, Self::S3, Self::Shared];

    /// Returns the display name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shared => "Shared",
            Self::S3 => "S3",
            Self::Cwl => "CWL",
        }
    }

    /// Returns the CloudFormation stack name for a stage.
    #[must_use]
    pub fn stack_name(self, prefix: &str, stage: &str) -> String {
        format!("{prefix}-{}-{stage}", self.as_str().to_lowercase())
    }
}

impl std::fmt::Display for StackType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!(StackType::from_str("cwl", true), Ok(StackType::Cwl));
        assert_eq!(StackType::from_str("SHARED", true), Ok(StackType::Shared));
        assert_eq!(StackType::from_str("s3", true), Ok(StackType::S3));
        assert!(StackType::from_str("Lambda", true).is_err());
    }

    #[test]
    fn test_stack_names() {
        assert_eq!(StackType::Cwl.stack_name("cwl", "dev"), "cwl-cwl-dev");
        assert_eq!(StackType::Shared.stack_name("cwl", "prod"), "cwl-shared-prod");
    }

    #[test]
    fn test_removal_order_covers_every_stack() {
        let mut order = StackType::REMOVAL_ORDER.to_vec();
        assert_eq!(order.first(), Some(&StackType::Cwl));
        order.sort_by_key(|s| s.as_str());
        let mut all = StackType::ALL.to_vec();
        all.sort_by_key(|s| s.as_str());
        assert_eq!(order, all);
    }
}
