use std::path::PathBuf;

use todo::error::{exit_codes, Error, JsonError, Outcome};

#[test]
fn exit_codes_map_correctly() {
    let user = Error::InvalidArgument("bad".to_string());
    assert_eq!(user.exit_code(), exit_codes::USER_ERROR);

    let missing = Error::ConfigNotFound(PathBuf::from("/tmp/todo/config.toml"));
    assert_eq!(missing.exit_code(), exit_codes::USER_ERROR);

    let unknown = Error::Operation(Outcome::IdNotFound);
    assert_eq!(unknown.exit_code(), exit_codes::USER_ERROR);

    let decode = Error::Operation(Outcome::DecodeError);
    assert_eq!(decode.exit_code(), exit_codes::OPERATION_FAILED);
}

#[test]
fn outcome_lifts_into_error() {
    assert!(Outcome::Success.into_result().is_ok());

    let err = Outcome::WriteError.into_result().expect_err("write error");
    assert_eq!(err.outcome(), Some(Outcome::WriteError));
    assert_eq!(Error::from(Outcome::ReadError).outcome(), Some(Outcome::ReadError));
}

#[test]
fn json_error_includes_code_and_outcome() {
    let err = Error::Operation(Outcome::IdNotFound);
    let json = JsonError::from(&err);
    assert_eq!(json.code, exit_codes::USER_ERROR);
    assert_eq!(json.message, "to-do id not found");
    assert_eq!(json.kind, "user_error");
    assert_eq!(json.outcome, Some(Outcome::IdNotFound));

    let details = json.details.expect("details");
    assert_eq!(details["outcome"], "id_not_found");
    assert_eq!(details["outcome_code"], 6);
}

#[test]
fn json_error_for_missing_database_names_path() {
    let err = Error::DatabaseNotFound(PathBuf::from("/tmp/todo.json"));
    let json = JsonError::from(&err);
    assert!(json.message.contains("Database not found"));
    assert_eq!(json.outcome, None);
    assert_eq!(json.details.expect("details")["path"], "/tmp/todo.json");
}

#[test]
fn json_error_serializes_kind_for_operation_failures() {
    let err = Error::Operation(Outcome::DecodeError);
    let value = serde_json::to_value(JsonError::from(&err)).expect("serialize");
    assert_eq!(value["kind"], "operation_failed");
    assert_eq!(value["code"], exit_codes::OPERATION_FAILED);
    assert_eq!(value["outcome"], "decode_error");
    assert_eq!(value["message"], "json decode error");
}
