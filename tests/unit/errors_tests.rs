/*!
 * Tests for error types and conversions
 */

use kwicindex::errors::{AppError, ExportError, ValidationError, XmlError};

#[test]
fn test_validationError_missingField_shouldDisplayCorrectly() {
    let error = ValidationError::MissingField("location");
    let display = format!("{}", error);
    assert!(display.contains("Missing required field"));
    assert!(display.contains("location"));
}

#[test]
fn test_validationError_invalidNumber_shouldDisplayValueAndPosition() {
    let error = ValidationError::InvalidNumber {
        value: "one".to_string(),
        position: 42,
    };
    let display = format!("{}", error);
    assert!(display.contains("one"));
    assert!(display.contains("42"));
}

#[test]
fn test_validationError_duplicatePunctuation_shouldDisplayType() {
    let error = ValidationError::DuplicatePunctuation {
        punctuation_type: "init".to_string(),
        position: 7,
    };
    let display = format!("{}", error);
    assert!(display.contains("Duplicate punctuation type"));
    assert!(display.contains("init"));
}

#[test]
fn test_validationError_punctuationOrder_shouldDisplayPosition() {
    let error = ValidationError::PunctuationOrder { position: 99 };
    let display = format!("{}", error);
    assert!(display.contains("incorrect order"));
    assert!(display.contains("99"));
}

#[test]
fn test_xmlError_parse_shouldDisplayMessageAndPosition() {
    let error = XmlError::parse("unexpected end of input", 128);
    let display = format!("{}", error);
    assert!(display.contains("XML parse error"));
    assert!(display.contains("unexpected end of input"));
    assert!(display.contains("128"));
}

#[test]
fn test_xmlError_fromValidationError_shouldWrapCorrectly() {
    let validation_error = ValidationError::MissingField("keyword");
    let xml_error: XmlError = validation_error.into();
    let display = format!("{}", xml_error);
    assert!(display.contains("Invalid context item"));
    assert!(display.contains("keyword"));
}

#[test]
fn test_appError_fromValidationError_shouldWrapCorrectly() {
    let validation_error = ValidationError::MissingField("location");
    let app_error: AppError = validation_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Validation error"));
    assert!(display.contains("location"));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("no such file"));
}

#[test]
fn test_appError_fromAnyhowError_shouldBecomeUnknown() {
    let anyhow_error = anyhow::anyhow!("something odd");
    let app_error: AppError = anyhow_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Unknown error"));
    assert!(display.contains("something odd"));
}

#[test]
fn test_exportError_fromIoError_shouldBecomeXmlWrite() {
    let io_error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
    let export_error: ExportError = io_error.into();
    let display = format!("{}", export_error);
    assert!(display.contains("Failed to write XML output"));
    assert!(display.contains("pipe closed"));
}
