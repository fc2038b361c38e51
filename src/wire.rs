use crate::domain::{NotificationRequest, OutgoingNotification};
use snafu::{ResultExt, Snafu};

pub fn decode_request(line: &str) -> Result<NotificationRequest> {
    serde_json::from_str(line).context(UnableToDecodeRequestSnafu)
}

pub fn encode_request(request: &NotificationRequest) -> Result<String> {
    serde_json::to_string(request).context(UnableToEncodeRequestSnafu)
}

pub fn encode_outgoing(notification: &OutgoingNotification) -> Result<String> {
    serde_json::to_string(notification).context(UnableToEncodeNotificationSnafu)
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Not a valid notification request: {}", source))]
    UnableToDecodeRequest { source: serde_json::Error },

    #[snafu(display("Unable to encode notification request"))]
    UnableToEncodeRequest { source: serde_json::Error },

    #[snafu(display("Unable to encode prepared notification"))]
    UnableToEncodeNotification { source: serde_json::Error },
}

type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod test {
    use super::*;
    use crate::domain::MemberId;

    #[test]
    fn decodes_all_fields() {
        let r = decode_request(r#"{"targetMemberId":42,"title":"Hello","body":"World"}"#).unwrap();

        assert_eq!(
            r,
            NotificationRequest::builder()
                .target_member_id(42)
                .title("Hello")
                .body("World")
                .build()
        );
    }

    #[test]
    fn missing_and_null_fields_are_absent() {
        let missing = decode_request(r#"{"title":"Reminder"}"#).unwrap();
        let null = decode_request(r#"{"targetMemberId":null,"title":"Reminder","body":null}"#)
            .unwrap();

        assert_eq!(missing, null);
        assert_eq!(missing.target_member_id(), None);
        assert_eq!(missing.title(), Some("Reminder"));
        assert_eq!(missing.body(), None);

        assert_eq!(decode_request("{}").unwrap(), NotificationRequest::new());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let r = decode_request(
            r#"{"targetMemberId":7,"image":"https://example.com/a.png","data":{"k":"v"}}"#,
        )
        .unwrap();

        assert_eq!(r.target_member_id(), Some(MemberId(7)));
    }

    #[test]
    fn rejects_bad_input() {
        for line in &[
            "",
            "not json",
            "[1, 2, 3]",
            r#"{"targetMemberId":"42"}"#,
            r#"{"title":5}"#,
            r#"{"targetMemberId":1.5}"#,
        ] {
            let e = decode_request(line).unwrap_err();
            assert!(
                matches!(e, Error::UnableToDecodeRequest { .. }),
                "{:?} gave {:?}",
                line,
                e
            );
        }
    }

    #[test]
    fn absent_fields_encode_as_null() {
        let r = NotificationRequest::builder().title("Reminder").build();

        assert_eq!(
            encode_request(&r).unwrap(),
            r#"{"targetMemberId":null,"title":"Reminder","body":null}"#
        );
    }

    #[test]
    fn outgoing_uses_request_field_names() {
        let n = OutgoingNotification {
            target: MemberId(42),
            title: "Hello".into(),
            body: "World".into(),
        };

        assert_eq!(
            encode_outgoing(&n).unwrap(),
            r#"{"targetMemberId":42,"title":"Hello","body":"World"}"#
        );
    }

    #[test]
    fn encode_errors_describe_themselves() {
        let source = || serde_json::from_str::<u8>("x").unwrap_err();

        assert_eq!(
            Error::UnableToEncodeRequest { source: source() }.to_string(),
            "Unable to encode notification request"
        );
        assert_eq!(
            Error::UnableToEncodeNotification { source: source() }.to_string(),
            "Unable to encode prepared notification"
        );
    }
}
