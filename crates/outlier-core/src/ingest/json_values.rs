//! JSON source: a top-level array of numbers.

use outlier_common::{Error, Result};

pub(crate) fn parse(data: &[u8]) -> Result<Vec<f64>> {
    serde_json::from_slice::<Vec<f64>>(data)
        .map_err(|e| Error::malformed(format!("failed to parse JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_become_floats() {
        assert_eq!(parse(b"[1,2,3]").unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn mixed_numbers_keep_order() {
        assert_eq!(
            parse(b" [ 3.5, -1, 0, 2e3 ] ").unwrap(),
            vec![3.5, -1.0, 0.0, 2000.0]
        );
    }

    #[test]
    fn empty_array_is_accepted() {
        assert_eq!(parse(b"[]").unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn object_is_malformed() {
        let err = parse(br#"{"values":[1,2]}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(ref msg) if msg.starts_with("failed to parse JSON")));
    }

    #[test]
    fn strings_are_malformed() {
        assert!(matches!(parse(br#"[1,"2"]"#), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn truncated_is_malformed() {
        assert!(matches!(parse(b"[1,2"), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn empty_buffer_is_malformed() {
        assert!(matches!(parse(b""), Err(Error::MalformedInput(_))));
    }
}
