#[cfg(test)]
mod common_tests {
    use crate::common::common::{current_time, equal_bytes_check};
    use crate::common::structs::custom_error::CustomError;

    #[test]
    fn test_custom_error_display() {
        let error = CustomError::new("socket setup failed");
        assert_eq!(format!("{}", error), "socket setup failed");
    }

    #[test]
    fn test_current_time_is_after_2020() {
        assert!(current_time() > 1_577_836_800);
    }

    #[test]
    fn test_equal_bytes_check() {
        assert!(equal_bytes_check(&[10, 0, 0, 1], &[10, 0, 0, 1]));
        assert!(!equal_bytes_check(&[10, 0, 0, 1], &[10, 0, 0, 2]));
        assert!(!equal_bytes_check(&[10, 0, 0, 1], &[10, 0, 0]));
        assert!(equal_bytes_check(&[], &[]));
    }
}
