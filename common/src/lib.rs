use validator::ValidationErrors;

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::format_validation_errors;
    use validator::Validate;

    #[derive(Validate)]
    struct Payload {
        #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
        password: String,
    }

    #[test]
    fn joins_field_messages() {
        let p = Payload {
            password: "short".into(),
        };
        let errs = p.validate().unwrap_err();
        assert_eq!(
            format_validation_errors(&errs),
            "Password must be at least 8 characters"
        );
    }
}
