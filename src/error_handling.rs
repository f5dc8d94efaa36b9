use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("invalid character, '{0}', encountered")]
    invalid_character(String),

    #[error("'{0}' is not a valid number")]
    invalid_number(String),

    #[error("the '{0}' operator has been misplaced")]
    invalid_operator(String),

    #[error("the '{0}' operator is not available in {1} mode")]
    unsupported_operator(String, &'static str),

    #[error("did not expect '{0}'")]
    did_not_expect(String),

    #[error("could not find '{0}'")]
    could_not_find(String),

    #[error("expression ended abruptly")]
    abrupt_end,

    #[error("nothing to evaluate")]
    blank,

    #[error("identifier, '{0}', is not defined")]
    undefined(String),

    #[error("'{0}' is not a valid variable name")]
    invalid_name(String),

    #[error("division by zero")]
    division_by_zero,

    #[error("variable '{0}' refers back to itself")]
    cyclic_reference(String),

    #[error("'{0}' does not fit in 64 bits")]
    overflow(String),

    #[error("expression nests deeper than {0} levels")]
    too_complex(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    invalid_name,
    syntax,
    unknown_identifier,
    division_by_zero,
    cyclic_reference,
    overflow,
    too_complex,
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        use CalcError::*;
        match self {
            invalid_character(_)
            | invalid_number(_)
            | invalid_operator(_)
            | unsupported_operator(..)
            | did_not_expect(_)
            | could_not_find(_)
            | abrupt_end
            | blank => ErrorKind::syntax,
            undefined(_) => ErrorKind::unknown_identifier,
            invalid_name(_) => ErrorKind::invalid_name,
            division_by_zero => ErrorKind::division_by_zero,
            cyclic_reference(_) => ErrorKind::cyclic_reference,
            overflow(_) => ErrorKind::overflow,
            too_complex(_) => ErrorKind::too_complex,
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_variants_share_a_kind() {
        assert_eq!(CalcError::abrupt_end.kind(), ErrorKind::syntax);
        assert_eq!(CalcError::could_not_find(")".into()).kind(), ErrorKind::syntax);
        assert_eq!(
            CalcError::unsupported_operator("&".into(), "mathematics").kind(),
            ErrorKind::syntax
        );
    }

    #[test]
    fn messages_name_the_culprit() {
        assert_eq!(
            CalcError::undefined("x".into()).to_string(),
            "identifier, 'x', is not defined"
        );
        assert_eq!(CalcError::too_complex(64).to_string(), "expression nests deeper than 64 levels");
    }
}
