//! Parsing of the raw `params` metadata string.
//!
//! The format is `<key>[;Name(arg,...)]*`. The key may be empty, in which case
//! the declared field name is used instead.
use crate::errors::InvalidFuncReason;

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ParamsMeta<'a> {
    /// `None` if the key segment is empty.
    pub(crate) key: Option<&'a str>,
    pub(crate) calls: Vec<RawCall<'a>>,
}

/// A validator call, before the name is resolved and the arguments coerced.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RawCall<'a> {
    pub(crate) name: &'a str,
    pub(crate) args: Vec<&'a str>,
}

pub(crate) fn parse_params(raw: &str) -> Result<ParamsMeta<'_>, InvalidFuncReason> {
    let mut segments = raw.split(';');
    let key = segments.next().filter(|k| !k.is_empty());
    let calls = segments
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_call)
        .collect::<Result<_, _>>()?;
    Ok(ParamsMeta { key, calls })
}

fn parse_call(segment: &str) -> Result<RawCall<'_>, InvalidFuncReason> {
    let malformed = || InvalidFuncReason::Malformed {
        segment: segment.to_owned(),
    };
    let (name, rest) = segment.split_once('(').ok_or_else(malformed)?;
    let (inner, trailing) = rest.split_once(')').ok_or_else(malformed)?;
    let name = name.trim();
    if name.is_empty() || !trailing.trim().is_empty() {
        return Err(malformed());
    }
    let args = if inner.trim().is_empty() {
        Vec::new()
    } else {
        inner.split(',').map(str::trim).collect()
    };
    Ok(RawCall { name, args })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_only() {
        assert_eq!(
            parse_params("aaa").unwrap(),
            ParamsMeta {
                key: Some("aaa"),
                calls: vec![]
            }
        );
        assert_eq!(parse_params("").unwrap().key, None);
    }

    #[test]
    fn empty_key_with_validators() {
        let meta = parse_params(";Range(1,10);Min(3)").unwrap();
        assert_eq!(meta.key, None);
        assert_eq!(
            meta.calls,
            vec![
                RawCall {
                    name: "Range",
                    args: vec!["1", "10"]
                },
                RawCall {
                    name: "Min",
                    args: vec!["3"]
                },
            ]
        );
    }

    #[test]
    fn whitespace_and_empty_segments_are_tolerated() {
        let meta = parse_params("x;; Range( 1 , 10 ) ;").unwrap();
        assert_eq!(meta.key, Some("x"));
        assert_eq!(
            meta.calls,
            vec![RawCall {
                name: "Range",
                args: vec!["1", "10"]
            }]
        );
    }

    #[test]
    fn empty_argument_lists() {
        let meta = parse_params("x;Min()").unwrap();
        assert!(meta.calls[0].args.is_empty());
        let meta = parse_params("x;Range(1,)").unwrap();
        assert_eq!(meta.calls[0].args, vec!["1", ""]);
    }

    #[test]
    fn malformed_calls() {
        for raw in ["x;Range(1,10", "x;Range", "x;(1,2)", "x;Range(1,2)x"] {
            assert!(
                matches!(
                    parse_params(raw),
                    Err(InvalidFuncReason::Malformed { .. })
                ),
                "{raw}"
            );
        }
    }
}
