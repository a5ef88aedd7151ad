use imap_flow_codec::{
    codec::{encode::Encoder, CommandCodec},
    imap_types::command::{Command, CommandBody},
};

#[test]
fn test_from_readme() {
    let cmd = Command::new("ABCD", CommandBody::login("alice", "password").unwrap()).unwrap();

    let buffer = CommandCodec.encode(&cmd).dump();

    // Note: IMAP4rev1 may produce messages that are not valid UTF-8, so this is only safe
    // because the example command above has no binary literal in it.
    assert_eq!(
        std::str::from_utf8(&buffer).unwrap(),
        "ABCD LOGIN alice password\r\n"
    );

    // The logging variant never reveals the password in the wire trace.
    let redacted = CommandCodec.encode_for_logging(&cmd).dump();
    assert!(!std::str::from_utf8(&redacted).unwrap().contains("password"));
}
