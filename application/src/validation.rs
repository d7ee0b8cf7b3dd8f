use error_stack::Report;
use kernel::{ErrorMessage, KernelError};
use uuid::Uuid;

pub(crate) fn require_length(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> error_stack::Result<(), KernelError> {
    let length = value.chars().count();
    if length < min {
        return Err(invalid(format!(
            "\"{field}\" length must be at least {min} characters long"
        )));
    }
    if length > max {
        return Err(invalid(format!(
            "\"{field}\" length must be less than or equal to {max} characters long"
        )));
    }
    Ok(())
}

pub(crate) fn require_range(
    field: &str,
    value: i32,
    min: i32,
    max: i32,
) -> error_stack::Result<(), KernelError> {
    if !(min..=max).contains(&value) {
        return Err(invalid(format!(
            "\"{field}\" must be between {min} and {max}"
        )));
    }
    Ok(())
}

/// Blank input counts as missing.
pub(crate) fn require_id(field: &str, value: Option<&str>) -> error_stack::Result<Uuid, KernelError> {
    let value = value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| invalid(format!("\"{field}\" is required")))?;
    Uuid::parse_str(value).map_err(|e| {
        Report::from(e)
            .change_context(KernelError::InvalidRequest)
            .attach_printable(ErrorMessage::new(format!(
                "\"{field}\" must be a valid id"
            )))
    })
}

fn invalid(message: String) -> Report<KernelError> {
    KernelError::InvalidRequest.with_message(message)
}

#[cfg(test)]
mod test {
    use kernel::{ErrorMessage, KernelError};
    use uuid::Uuid;

    use super::{require_id, require_length, require_range};

    fn message_of(report: &error_stack::Report<KernelError>) -> String {
        report
            .downcast_ref::<ErrorMessage>()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    #[test]
    fn length_bounds_are_inclusive() {
        assert!(require_length("name", "abcde", 5, 50).is_ok());
        assert!(require_length("name", &"a".repeat(50), 5, 50).is_ok());

        let short = require_length("name", "gen", 5, 50).unwrap_err();
        assert_eq!(short.current_context(), &KernelError::InvalidRequest);
        assert!(message_of(&short).contains("at least 5"));

        let long = require_length("name", &"a".repeat(51), 5, 50).unwrap_err();
        assert!(message_of(&long).contains("less than or equal to 50"));
    }

    #[test]
    fn range_rejects_negative_stock() {
        assert!(require_range("numberInStock", 0, 0, 255).is_ok());
        assert!(require_range("numberInStock", -1, 0, 255).is_err());
    }

    #[test]
    fn missing_and_blank_ids_name_the_field() {
        let missing = require_id("movieId", None).unwrap_err();
        assert_eq!(message_of(&missing), "\"movieId\" is required");

        let blank = require_id("customerId", Some("  ")).unwrap_err();
        assert_eq!(message_of(&blank), "\"customerId\" is required");
    }

    #[test]
    fn malformed_id_is_invalid_request() {
        let report = require_id("movieId", Some("1")).unwrap_err();
        assert_eq!(report.current_context(), &KernelError::InvalidRequest);
        assert_eq!(message_of(&report), "\"movieId\" must be a valid id");

        let id = Uuid::new_v4();
        assert_eq!(require_id("movieId", Some(&id.to_string())).unwrap(), id);
    }
}
