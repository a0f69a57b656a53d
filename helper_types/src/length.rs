use serde_derive::{Deserialize, Serialize};

/// Separator the generated code uses for member access through a pointer.
pub const POINTER_MEMBER_SEPARATOR: &str = "->";

/// How the element count of an array-shaped member is obtained.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum LengthSpec {
    /// Another member of the same struct holds the element count. The name may
    /// be a member path such as `pInfo->count`.
    FieldReference(String),
    /// No explicit count; the member is sized by its terminator.
    NullTerminated,
    /// The element count is `field / divisor`, using integer division.
    DividedFieldReference { field: String, divisor: u64 },
}

impl LengthSpec {
    /// The referenced count path, if this length carries an explicit count.
    pub fn count_path(&self) -> Option<&str> {
        match self {
            LengthSpec::FieldReference(path) => Some(path),
            LengthSpec::DividedFieldReference { field, .. } => Some(field),
            LengthSpec::NullTerminated => None,
        }
    }

    /// The member of the owning struct that the count path starts at.
    pub fn root_field(&self) -> Option<&str> {
        self.count_path().map(|path| {
            path.split(POINTER_MEMBER_SEPARATOR)
                .next()
                .unwrap_or(path)
                .trim()
        })
    }

    pub fn is_counted(&self) -> bool {
        self.count_path().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_field_strips_member_access() {
        let spec = LengthSpec::FieldReference("pAllocateInfo->descriptorSetCount".into());
        assert_eq!(spec.count_path(), Some("pAllocateInfo->descriptorSetCount"));
        assert_eq!(spec.root_field(), Some("pAllocateInfo"));
    }

    #[test]
    fn divided_reference_is_counted() {
        let spec = LengthSpec::DividedFieldReference {
            field: "codeSize".into(),
            divisor: 4,
        };
        assert!(spec.is_counted());
        assert_eq!(spec.root_field(), Some("codeSize"));
    }

    #[test]
    fn null_terminated_has_no_count() {
        assert!(!LengthSpec::NullTerminated.is_counted());
        assert_eq!(LengthSpec::NullTerminated.root_field(), None);
    }
}
