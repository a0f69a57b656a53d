use crate::error::SchemaError;
use crate::registry::MemberDecl;

/// Type, name and qualifiers of one member; length semantics are resolved
/// separately once all members of the struct are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedMember<'a> {
    pub type_name: &'a str,
    pub field_name: &'a str,
    pub is_pointer: bool,
    pub is_const: bool,
}

pub fn classify<'a>(
    owner: &str,
    member: &'a MemberDecl,
) -> Result<ClassifiedMember<'a>, SchemaError> {
    let type_name = member
        .type_token
        .as_deref()
        .ok_or_else(|| missing_token(owner, "type"))?;
    let field_name = member
        .name_token
        .as_deref()
        .ok_or_else(|| missing_token(owner, "name"))?;

    Ok(ClassifiedMember {
        type_name,
        field_name,
        is_pointer: member.qualifier_tail.iter().any(|tail| tail.contains('*')),
        is_const: has_const_qualifier(&member.declaration),
    })
}

fn missing_token(owner: &str, token: &'static str) -> SchemaError {
    SchemaError::MissingMemberToken {
        type_name: owner.to_string(),
        token,
    }
}

/* `const` as a whole token; member names such as `constantID` do not count */
fn has_const_qualifier(declaration: &str) -> bool {
    declaration
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .any(|token| token == "const")
}
