/* Length attribute resolution.
 *
 * Forms seen in the registry:
 *   len="null-terminated"                           -> NullTerminated
 *   len="enabledLayerCount,null-terminated"         -> FieldReference
 *   len="latexmath:[$dataSize \over 4$]"            -> DividedFieldReference
 *   len="latexmath:[$\lceil{\mathit{rasterizationSamples} \over 32}\rceil$]"
 *   len="pAllocateInfo::descriptorSetCount"         -> FieldReference, `::` becomes `->`
 */

use crate::error::SchemaError;
use helper_types::{LengthSpec, POINTER_MEMBER_SEPARATOR};
use regex::Regex;
use std::sync::OnceLock;

pub const NULL_TERMINATED: &str = "null-terminated";

const REGISTRY_MEMBER_SEPARATOR: &str = "::";

/// The two latexmath shapes the registry uses for divided counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatexLength {
    /// `latexmath:[$\lceil{\mathit{NAME} \over N}\rceil$]`
    Bracketed { field: String, divisor: u64 },
    /// `latexmath:[$NAME \over N$]`
    Bare { field: String, divisor: u64 },
    Unrecognized,
}

impl LatexLength {
    pub fn parse(source: &str) -> Self {
        if let Some(caps) = bracketed_form().captures(source) {
            /* Opening and closing delimiters must agree: lceil/rceil, lfloor/rfloor */
            if caps[1] != caps[4] {
                return LatexLength::Unrecognized;
            }
            return match caps[3].parse() {
                Ok(divisor) if divisor > 0 => LatexLength::Bracketed {
                    field: caps[2].to_string(),
                    divisor,
                },
                _ => LatexLength::Unrecognized,
            };
        }
        if let Some(caps) = bare_form().captures(source) {
            return match caps[2].parse() {
                Ok(divisor) if divisor > 0 => LatexLength::Bare {
                    field: caps[1].to_string(),
                    divisor,
                },
                _ => LatexLength::Unrecognized,
            };
        }
        LatexLength::Unrecognized
    }

    fn into_spec(self) -> Option<LengthSpec> {
        match self {
            LatexLength::Bracketed { field, divisor } | LatexLength::Bare { field, divisor } => {
                Some(LengthSpec::DividedFieldReference { field, divisor })
            }
            LatexLength::Unrecognized => None,
        }
    }
}

fn bracketed_form() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^latexmath\s*:\s*\[\s*\$\\l(\w+)\s*\{\s*\\mathit\s*\{\s*(\w+)\s*\}\s*\\over\s*(\d+)\s*\}\s*\\r(\w+)\$\s*\]\s*$",
        )
        .expect("bracketed latexmath pattern")
    })
}

fn bare_form() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^latexmath\s*:\s*\[\s*\$\s*(\w+)\s*\\over\s*(\d+)\s*\$\s*\]\s*$")
            .expect("bare latexmath pattern")
    })
}

/// Resolves the `len` attribute of `owner.field`.
///
/// `None` means the member has no length semantics at all (a fixed-size or
/// singly-pointed member).
pub fn resolve(owner: &str, field: &str, raw: Option<&str>) -> Result<Option<LengthSpec>, SchemaError> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    if raw == NULL_TERMINATED {
        return Ok(Some(LengthSpec::NullTerminated));
    }

    /* Array of strings: the outer count is explicit, each string is terminated */
    if raw.split(',').skip(1).any(|part| part.trim() == NULL_TERMINATED) {
        let count = raw.split(',').next().unwrap_or(raw).trim();
        return Ok(Some(LengthSpec::FieldReference(normalize_reference(count))));
    }

    if raw.contains("latexmath") {
        return LatexLength::parse(raw).into_spec().map(Some).ok_or_else(|| {
            SchemaError::UnrecognizedLengthExpression {
                type_name: owner.to_string(),
                field: field.to_string(),
                expression: raw.to_string(),
            }
        });
    }

    Ok(Some(LengthSpec::FieldReference(normalize_reference(raw))))
}

fn normalize_reference(reference: &str) -> String {
    reference.replace(REGISTRY_MEMBER_SEPARATOR, POINTER_MEMBER_SEPARATOR)
}
