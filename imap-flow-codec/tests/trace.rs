//! End-to-end traces of whole commands and responses, built by hand (not round-tripped through a
//! parser — this core never parses, it only encodes) and checked against the exact bytes a real
//! client or server would see on the wire.

use std::num::NonZeroU32;

use imap_flow_codec::{
    codec::{
        encode::{Encoder, FetchResponseEncoder, Fragment},
        CommandCodec, ResponseCodec,
    },
    imap_types::{
        command::{Command, CommandBody},
        core::{Literal, NString, Vec1},
        fetch::{MessageDataItem, MessageDataItemName, Section},
        flag::{Flag, StoreResponse, StoreType},
        response::{Data, FetchResponse, Response, StreamingDataItemKind},
        search::SearchKey,
        sequence::SequenceSet,
    },
};

fn dump_command(cmd: &Command<'_>) -> String {
    String::from_utf8(CommandCodec.encode(cmd).dump()).unwrap()
}

fn dump_response(rsp: &Response<'_>) -> String {
    String::from_utf8(ResponseCodec.encode(rsp).dump()).unwrap()
}

#[test]
fn trace_login_select_fetch() {
    let login = Command::new("A1", CommandBody::login("alice", "password").unwrap()).unwrap();
    assert_eq!(dump_command(&login), "A1 LOGIN alice password\r\n");

    let select = Command::new("A2", CommandBody::select("INBOX").unwrap()).unwrap();
    assert_eq!(dump_command(&select), "A2 SELECT INBOX\r\n");

    let fetch = Command::new(
        "A3",
        CommandBody::Fetch {
            sequence_set: SequenceSet::try_from(1..=3).unwrap(),
            macro_or_item_names:
                imap_flow_codec::imap_types::fetch::MacroOrMessageDataItemNames::MessageDataItemNames(
                    vec![MessageDataItemName::Uid, MessageDataItemName::Flags],
                ),
            uid: false,
        },
    )
    .unwrap();
    assert_eq!(dump_command(&fetch), "A3 FETCH 1:3 (UID FLAGS)\r\n");
}

#[test]
fn trace_store_silent() {
    let store = Command::new(
        "A4",
        CommandBody::Store {
            sequence_set: SequenceSet::try_from(1).unwrap(),
            kind: StoreType::Add,
            response: StoreResponse::Silent,
            flags: vec![Flag::Seen],
            uid: false,
        },
    )
    .unwrap();

    assert_eq!(dump_command(&store), "A4 STORE 1 +FLAGS.SILENT (\\Seen)\r\n");
}

#[test]
fn trace_search_with_boolean_combinators() {
    let search = Command::new(
        "A5",
        CommandBody::Search {
            charset: None,
            criteria: Vec1::from(SearchKey::And(
                Vec1::try_from(vec![SearchKey::Seen, SearchKey::Flagged])
                    .unwrap(),
            )),
            uid: false,
        },
    )
    .unwrap();

    assert_eq!(dump_command(&search), "A5 SEARCH (SEEN FLAGGED)\r\n");
}

#[test]
fn trace_literal_requires_continuation_before_payload() {
    // A client with no LITERAL+/LITERAL- negotiated must stop after the `{N}\r\n` header.
    let cmd = Command::new(
        "A6",
        CommandBody::login("alice", Literal::try_from(vec![b'A'; 200]).unwrap()).unwrap(),
    )
    .unwrap();

    let fragments: Vec<_> = CommandCodec.encode(&cmd).collect();
    assert_eq!(fragments.len(), 3);

    match &fragments[0] {
        Fragment::Line { data } => assert_eq!(data, b"A6 LOGIN alice {200}\r\n"),
        other => panic!("expected a line fragment, got {other:?}"),
    }
    match &fragments[1] {
        Fragment::Literal { data, .. } => assert_eq!(data.len(), 200),
        other => panic!("expected a literal fragment, got {other:?}"),
    }
    match &fragments[2] {
        Fragment::Line { data } => assert_eq!(data, b"\r\n"),
        other => panic!("expected a trailing line fragment, got {other:?}"),
    }
}

#[test]
fn trace_fetch_response_with_streamed_body_section() {
    let rsp = Response::Data(Data::Fetch {
        seq: NonZeroU32::new(7).unwrap(),
        items: {
            let mut items = vec![MessageDataItem::Uid(NonZeroU32::new(42).unwrap())];
            items.push(MessageDataItem::BodyExt {
                section: Some(Section::Text(None)),
                origin: None,
                data: NString::from(Literal::try_from(b"HELLO".as_ref()).unwrap()),
            });
            Vec1::try_from(items).unwrap()
        },
    });

    let out = String::from_utf8(ResponseCodec.encode(&rsp).dump()).unwrap();
    assert_eq!(out, "* 7 FETCH (UID 42 BODY[TEXT] {5}\r\nHELLO)\r\n");
}

#[test]
fn trace_fetch_response_pushed_event_by_event() {
    // Same wire bytes as `trace_fetch_response_with_streamed_body_section`, but built from
    // discrete events as a server would emit them while still reading the body section off disk.
    let mut enc = FetchResponseEncoder::new();
    enc.push(&FetchResponse::Start(NonZeroU32::new(7).unwrap()))
        .unwrap();
    enc.push(&FetchResponse::SimpleAttribute(MessageDataItem::Uid(
        NonZeroU32::new(42).unwrap(),
    )))
    .unwrap();
    enc.push(&FetchResponse::StreamingBegin {
        kind: StreamingDataItemKind::BodyExt {
            section: Some(Section::Text(None)),
            origin: None,
        },
        size: 5,
    })
    .unwrap();
    enc.push(&FetchResponse::StreamingBytes(b"HELLO".as_ref().into()))
        .unwrap();
    enc.push(&FetchResponse::StreamingEnd).unwrap();
    enc.push(&FetchResponse::Finish).unwrap();

    let out = String::from_utf8(enc.finish().dump()).unwrap();
    assert_eq!(out, "* 7 FETCH (UID 42 BODY[TEXT] {5}\r\nHELLO)\r\n");
}

#[test]
fn trace_fetch_response_logging_redacts_streamed_payload() {
    let mut enc = FetchResponseEncoder::new_logging();
    enc.push(&FetchResponse::Start(NonZeroU32::new(7).unwrap()))
        .unwrap();
    enc.push(&FetchResponse::StreamingBegin {
        kind: StreamingDataItemKind::Rfc822Text,
        size: 5,
    })
    .unwrap();
    enc.push(&FetchResponse::StreamingBytes(b"HELLO".as_ref().into()))
        .unwrap();
    enc.push(&FetchResponse::Finish).unwrap();

    let out = String::from_utf8(enc.finish().dump()).unwrap();
    // The length prefix still says 5, but the payload itself is redacted.
    assert_eq!(out, "* 7 FETCH (RFC822.TEXT {5}\r\n\u{2205})\r\n");
}

#[test]
fn trace_tagged_completion_and_bye() {
    use imap_flow_codec::imap_types::response::Status;

    let ok = Response::Status(
        Status::ok(Some("A7".try_into().unwrap()), None, "done").unwrap(),
    );
    assert_eq!(dump_response(&ok), "A7 OK done\r\n");

    let bye = Response::Status(Status::Bye {
        code: None,
        text: "shutting down".try_into().unwrap(),
    });
    assert_eq!(dump_response(&bye), "* BYE shutting down\r\n");
}
