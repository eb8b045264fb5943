use crate::kind::Value;

use super::Arg;

pub(super) fn range(value: &Value, args: &[Arg]) -> bool {
    let [Arg::Int64(min), Arg::Int64(max)] = args else {
        return false;
    };
    value.as_signed().is_some_and(|v| *min <= v && v <= *max)
}

pub(super) fn min(value: &Value, args: &[Arg]) -> bool {
    let [Arg::Int64(min)] = args else {
        return false;
    };
    value.as_signed().is_some_and(|v| v >= *min)
}

pub(super) fn length(value: &Value, args: &[Arg]) -> bool {
    let [Arg::Int(min), Arg::Int(max)] = args else {
        return false;
    };
    // Negative bounds behave as if the length were a signed quantity.
    value.length().is_some_and(|len| {
        let len = isize::try_from(len).unwrap_or(isize::MAX);
        *min <= len && len <= *max
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(min: isize, max: isize) -> [Arg; 2] {
        [Arg::Int(min), Arg::Int(max)]
    }

    #[test]
    fn range_rejects_non_signed_values() {
        let args = [Arg::Int64(0), Arg::Int64(10)];
        assert!(range(&Value::I8(5), &args));
        assert!(!range(&Value::U8(5), &args));
        assert!(!range(&Value::String("5".into()), &args));
        assert!(!range(&Value::I8(5), &[Arg::Int64(0)]));
    }

    #[test]
    fn length_counts_code_points_for_strings() {
        assert!(length(&Value::String("héll".into()), &bounds(2, 4)));
        assert!(!length(&Value::String("héllo".into()), &bounds(2, 4)));
        assert!(length(&Value::String("hé".into()), &bounds(2, 4)));
        assert!(!length(&Value::String("h".into()), &bounds(2, 4)));
    }

    #[test]
    fn length_counts_elements_for_sequences() {
        assert!(length(&Value::I64Seq(vec![]), &bounds(0, 2)));
        assert!(length(&Value::I64Seq(vec![1, 2]), &bounds(0, 2)));
        assert!(!length(&Value::I64Seq(vec![1, 2, 3]), &bounds(0, 2)));
        assert!(length(
            &Value::StringSeq(vec!["".into()]),
            &bounds(1, 1)
        ));
    }

    #[test]
    fn length_does_not_apply_to_numbers() {
        assert!(!length(&Value::I64(3), &bounds(0, 10)));
        assert!(!length(&Value::Bool(true), &bounds(0, 10)));
    }

    #[test]
    fn min_is_inclusive() {
        assert!(min(&Value::I32(3), &[Arg::Int64(3)]));
        assert!(!min(&Value::I32(2), &[Arg::Int64(3)]));
        assert!(!min(&Value::F64(4.0), &[Arg::Int64(3)]));
    }
}
