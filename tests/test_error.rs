//! Error classification and messages

use bech32x::Error;

#[test]
fn test_structural_errors_are_malformed() {
    let malformed = [
        Error::InvalidCharacterRange(' '),
        Error::MixedCase,
        Error::MissingSeparator,
        Error::EmptyHrp,
        Error::TooLong(1024),
        Error::ChecksumTooShort(3),
        Error::InvalidDataCharacter('b'),
        Error::HrpMismatch {
            expected: "bc".to_string(),
            found: "tx".to_string(),
        },
    ];
    for e in &malformed {
        assert!(e.is_malformed(), "{:?} should be malformed", e);
    }
}

#[test]
fn test_checksum_errors_are_not_malformed() {
    assert!(!Error::InvalidChecksum.is_malformed());
    assert!(!Error::Uncorrectable.is_malformed());
    assert!(!Error::InvalidPadding.is_malformed());
}

#[test]
fn test_display_messages() {
    assert_eq!(Error::InvalidChecksum.to_string(), "Invalid checksum");
    assert_eq!(Error::MissingSeparator.to_string(), "Missing separator '1'");
    assert_eq!(
        Error::TooLong(1100).to_string(),
        "String is 1100 characters long, maximum is 1023"
    );
    assert_eq!(
        Error::ChecksumTooShort(26).to_string(),
        "Checksum too short: 26 characters after separator, need at least 27"
    );
    assert_eq!(
        Error::InvalidDataCharacter('o').to_string(),
        "Invalid data character 'o'"
    );
    assert_eq!(
        Error::HrpMismatch {
            expected: "bc".to_string(),
            found: "tx".to_string()
        }
        .to_string(),
        "Human-readable prefix mismatch: expected \"bc\", found \"tx\""
    );
}
