//! Property tests for parameter extraction

use gcodescan_analyzer::{code_float, code_int, split_comment, Command};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_float_parameter_is_found(x in -1.0e6f64..1.0e6, f in 1.0f64..1.0e5) {
        let line = format!("G1 X{} F{}", x, f);
        prop_assert_eq!(code_float(&line, 'X'), Some(x));
        prop_assert_eq!(code_float(&line, 'F'), Some(f));
        prop_assert_eq!(code_float(&line, 'Y'), None);
    }

    #[test]
    fn prop_int_parameter_is_found(g in 0i64..1000, t in 0i64..100) {
        let line = format!("G{} T{}", g, t);
        prop_assert_eq!(code_int(&line, 'G'), Some(g));
        prop_assert_eq!(code_int(&line, 'T'), Some(t));
    }

    #[test]
    fn prop_garbage_never_panics(line in "\\PC*") {
        let _ = code_float(&line, 'X');
        let _ = code_int(&line, 'G');
        let (code, _) = split_comment(&line);
        let _ = Command::parse(code);
    }

    #[test]
    fn prop_comment_is_cut(x in 0u32..1000, e in 0u32..1000) {
        let line = format!("G1 X{} ; E{}", x, e);
        let (code, comment) = split_comment(&line);
        prop_assert_eq!(code_float(code, 'E'), None);
        let expected = format!("E{}", e);
        prop_assert_eq!(comment, Some(expected.as_str()));
    }
}
