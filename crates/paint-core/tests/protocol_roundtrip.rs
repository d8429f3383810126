//! Integration tests for the paint-core codec and session.
//!
//! These drive the public API the way the client does: bytes come in, get
//! decoded, and are applied to a [`Session`]; intents go out through the
//! session and get encoded.

use std::time::Instant;

use paint_core::{
    decode_inbound, decode_outbound, encode_inbound, encode_outbound, Command, ConnectionState,
    Intent, OutboundCommand, Point, ProtocolError, Session,
};

/// Simulates the relay: stamps an outbound datagram with a sender identity.
///
/// The relay's Erase colour is not observable from the client side, so Erase
/// is re-encoded with the colour supplied by the caller.
fn relay(outbound: &[u8], user: &str, erase_color: u16) -> Vec<u8> {
    let cmd = decode_outbound(outbound).expect("client sent a valid datagram");
    let user = user.to_string();
    let inbound = match cmd {
        OutboundCommand::Connect => Command::Connect { user },
        OutboundCommand::Disconnect => Command::Disconnect { user },
        OutboundCommand::Draw(point) => Command::Draw { user, point },
        OutboundCommand::Erase { x, y } => Command::Erase {
            user,
            point: Point::new(x, y, erase_color),
        },
        OutboundCommand::Message { text } => Command::Message { user, text },
    };
    encode_inbound(&inbound)
}

#[test]
fn test_every_inbound_variant_round_trips() {
    let p = Point::new(10, 20, 2);
    for cmd in [
        Command::Connect { user: "alice".to_string() },
        Command::Disconnect { user: "alice".to_string() },
        Command::Draw { user: "alice".to_string(), point: p },
        Command::Erase { user: "alice".to_string(), point: p },
        Command::Message { user: "alice".to_string(), text: "hi".to_string() },
    ] {
        assert_eq!(decode_inbound(&encode_inbound(&cmd)), Ok(cmd));
    }
}

#[test]
fn test_startup_connect_then_relay_connect_logs_user() {
    // Arrange
    let mut session = Session::default();

    // Act
    let hello = session.start(Instant::now()).expect("fresh session announces");
    let bytes = encode_outbound(&hello);
    let echoed = decode_inbound(&relay(&bytes, "alice", 0)).expect("relay frame decodes");
    session.apply(&echoed);

    // Assert
    assert_eq!(bytes, vec![0x00, 0x00]);
    assert_eq!(session.lines().collect::<Vec<_>>(), vec!["alice connected"]);
    assert_eq!(session.connection_state(), ConnectionState::Connected);
}

#[test]
fn test_local_draw_becomes_visible_only_after_echo() {
    let mut session = Session::default();
    session.start(Instant::now());

    let draw = session
        .originate(Intent::Draw { x: 10, y: 20 })
        .expect("draw intent emits a command");
    assert!(session.points().is_empty());

    let echoed = decode_inbound(&relay(&encode_outbound(&draw), "me", 0)).unwrap();
    session.apply(&echoed);
    assert_eq!(session.points(), &[Point::new(10, 20, 0)]);

    let erase = session.originate(Intent::Erase { x: 10, y: 20 }).unwrap();
    let echoed = decode_inbound(&relay(&encode_outbound(&erase), "me", 0)).unwrap();
    session.apply(&echoed);
    assert!(session.points().is_empty());
}

#[test]
fn test_garbage_datagrams_never_reach_session() {
    let mut session = Session::default();
    session.start(Instant::now());

    for junk in [&[][..], &[0xFF][..], &[0x12, 0x34, 0x00][..], &[0x00, 0x02, b'x'][..]] {
        if let Ok(cmd) = decode_inbound(junk) {
            panic!("junk {junk:?} decoded to {cmd:?}");
        }
    }
    assert_eq!(session.lines().count(), 0);
    assert!(session.points().is_empty());
}

#[test]
fn test_unknown_opcode_is_reported() {
    assert_eq!(decode_inbound(&[0x00, 0x05]), Err(ProtocolError::UnknownOpcode(5)));
}

#[test]
fn test_draw_and_erase_from_non_utf8_identity_still_apply() {
    // Arrange: a relay that stamps Latin-1 identities
    let mut session = Session::default();
    let draw = [
        0x00, 0x02, b'z', b'o', 0xEB, 0x00, 0x00, 0x0A, 0x00, 0x14, 0x00, 0x02,
    ];
    let erase = [
        0x00, 0x03, b'z', b'o', 0xEB, 0x00, 0x00, 0x0A, 0x00, 0x14, 0x00, 0x02,
    ];

    // Act / Assert
    session.apply(&decode_inbound(&draw).expect("draw decodes"));
    assert_eq!(session.points(), &[Point::new(10, 20, 2)]);

    session.apply(&decode_inbound(&erase).expect("erase decodes"));
    assert!(session.points().is_empty());
}
