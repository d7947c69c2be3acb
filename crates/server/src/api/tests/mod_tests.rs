use std::time::Duration;

use shared::error::ErrorCode;

use super::*;

#[test]
fn command_failures_keep_distinct_codes_and_messages() {
    let timeout = command_failed(CommandError::Timeout(Duration::from_millis(3000)));
    assert_eq!(timeout.code, ErrorCode::Timeout);
    assert!(timeout.message.starts_with("light controller did not respond in time"));

    let rejected = command_failed(CommandError::DeviceRejected {
        status: 409,
        body: "zone locked".into(),
    });
    assert_eq!(rejected.code, ErrorCode::DeviceRejected);
    assert!(rejected.message.contains("rejected"));
    assert!(rejected.message.contains("zone locked"));

    let aborted = command_failed(CommandError::Aborted);
    assert_eq!(aborted.code, ErrorCode::TransportFailure);
    assert!(aborted.message.starts_with("light controller unreachable"));
}
