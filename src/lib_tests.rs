use super::*;

#[test]
fn exit_codes_are_distinct() {
    assert_ne!(EXIT_SUCCESS, EXIT_VIOLATIONS_FOUND);
    assert_ne!(EXIT_SUCCESS, EXIT_CONFIG_ERROR);
    assert_ne!(EXIT_VIOLATIONS_FOUND, EXIT_CONFIG_ERROR);
}

#[test]
fn error_reexports_are_usable() {
    let err: Result<()> = Err(SpaceGuardError::InvalidPayload);
    assert!(err.is_err());
}
