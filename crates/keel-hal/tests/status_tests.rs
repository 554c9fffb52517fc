use embedded_hal::i2c::{Error as _, ErrorKind, NoAcknowledgeSource};
use keel_hal::{exit_code, Error, Status};

const ALL: [Error; 11] = [
    Error::Failed,
    Error::InvalidParam,
    Error::Busy,
    Error::Timeout,
    Error::NotReady,
    Error::NotSupported,
    Error::InvalidState,
    Error::Nack,
    Error::ArbitrationLost,
    Error::Bus,
    Error::Overrun,
];

#[test]
fn codes_are_nonzero_and_distinct() {
    let mut seen = std::collections::HashSet::new();
    for e in ALL {
        assert_ne!(e.code(), 0, "{e:?} must not share the success code");
        assert!(seen.insert(e.code()), "{e:?} has a duplicate code");
    }
}

#[test]
fn codes_decode_back() {
    for e in ALL {
        assert_eq!(Error::try_from(e.code()).ok(), Some(e));
        assert_eq!(u8::from(e), e.code());
    }
    assert!(Error::try_from(0).is_err());
    assert!(Error::try_from(200).is_err());
}

#[test]
fn exit_code_is_zero_only_on_success() {
    let ok: Status = Ok(());
    assert_eq!(exit_code(ok), 0);
    for e in ALL {
        assert_eq!(exit_code(Err(e)), e.code());
    }
}

#[test]
fn i2c_kind_mapping() {
    assert!(matches!(Error::Nack.kind(), ErrorKind::NoAcknowledge(_)));
    assert_eq!(Error::ArbitrationLost.kind(), ErrorKind::ArbitrationLoss);
    assert_eq!(Error::Bus.kind(), ErrorKind::Bus);
    assert_eq!(Error::Overrun.kind(), ErrorKind::Overrun);
    assert_eq!(Error::Timeout.kind(), ErrorKind::Other);

    assert_eq!(
        Error::from(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)),
        Error::Nack
    );
    assert_eq!(Error::from(ErrorKind::Other), Error::Failed);
}

#[test]
fn display_includes_code() {
    assert_eq!(
        Error::Nack.to_string(),
        "no acknowledge from device (code 8)"
    );
}
