use super::*;

#[test]
fn codes_render_as_their_name() {
    assert_eq!(ErrorCode::E2004.to_string(), "E2004");
    assert_eq!(ErrorCode::E1002.as_str(), "E1002");
    assert_eq!(ErrorCode::W2001.as_str(), "W2001");
}
