//! Codec Tests
//!
//! Tests for request encoding and answer decoding.

use bytes::BytesMut;
use devlink::protocol::{
    codes, decode_value, encode_into, encode_request, format_argument, to_float, to_int,
    to_text, validate_answer, Marker, MAX_REQUEST_LEN, SKIP_INDEXED, SKIP_PLAIN,
};
use devlink::{Code, Frame, LinkError};

// =============================================================================
// Request Encoding Tests
// =============================================================================

#[test]
fn test_encode_single_code() {
    let frame = encode_request(&[codes::GET_PLANE]).unwrap();
    assert_eq!(frame.as_bytes(), b"R/22");
    assert_eq!(frame.marker(), Some(Marker::Request));
}

#[test]
fn test_encode_composite_request() {
    let codes: Vec<Code> = codes::ENGINE_METRICS.iter().map(|c| c.with_arg(0)).collect();
    let frame = encode_request(&codes).unwrap();
    assert_eq!(frame.as_bytes(), b"R/64\\0/66\\0/68\\0/70\\0/72\\0/74\\0");
}

#[test]
fn test_encode_all_instruments() {
    let instruments = [
        codes::GET_IAS,
        codes::GET_VARIO,
        codes::GET_SLIP,
        codes::GET_TURN,
        codes::GET_ANG_SPD,
        codes::GET_ALT,
        codes::GET_AZI,
        codes::GET_BEACON_AZI,
        codes::GET_ROLL,
        codes::GET_PITCH,
        codes::GET_FUEL,
    ];
    let frame = encode_request(&instruments).unwrap();
    assert_eq!(frame.as_bytes(), b"R/30/32/34/36/38/40/42/44/46/48/50");
}

#[test]
fn test_encode_set_value_argument() {
    let code = codes::SET_AILERON.with_arg(format_argument(0.5));
    let frame = encode_request(&[code]).unwrap();
    assert_eq!(frame.as_bytes(), b"R/85\\0.500000");
}

#[test]
fn test_encode_exactly_at_limit() {
    // 'R' + '/' + 62 bytes = 64
    let code = Code::from("9".repeat(MAX_REQUEST_LEN - 2));
    let frame = encode_request(&[code]).unwrap();
    assert_eq!(frame.len(), MAX_REQUEST_LEN);
}

#[test]
fn test_encode_over_limit_is_rejected() {
    let code = Code::from("9".repeat(MAX_REQUEST_LEN - 1));
    let result = encode_request(&[code]);
    assert!(matches!(result, Err(LinkError::Encoding(_))));
}

#[test]
fn test_encode_many_codes_over_limit() {
    let codes: Vec<Code> = (0..30).map(|_| codes::GET_ALT).collect();
    assert!(matches!(encode_request(&codes), Err(LinkError::Encoding(_))));
}

#[test]
fn test_encode_rejects_empty_list_and_empty_code() {
    assert!(matches!(encode_request(&[]), Err(LinkError::Encoding(_))));
    assert!(matches!(
        encode_request(&[Code::from("")]),
        Err(LinkError::Encoding(_))
    ));
}

#[test]
fn test_encode_rejects_embedded_delimiter() {
    let result = encode_request(&[Code::from("30/32")]);
    assert!(matches!(result, Err(LinkError::Encoding(_))));
}

#[test]
fn test_encode_into_clears_buffer_on_failure() {
    let mut buf = BytesMut::new();
    encode_into(&mut buf, &[codes::GET_VERSION]).unwrap();
    assert_eq!(&buf[..], b"R/2");

    let oversized = Code::from("1".repeat(100));
    assert!(encode_into(&mut buf, &[oversized]).is_err());
    assert!(buf.is_empty());
}

#[test]
fn test_format_argument_six_decimals() {
    assert_eq!(format_argument(0.5), "0.500000");
    assert_eq!(format_argument(-1.0), "-1.000000");
}

// =============================================================================
// Answer Validation Tests
// =============================================================================

#[test]
fn test_validate_answer_marker() {
    assert!(validate_answer(Frame::from_static(b"A/22\\P-51")).is_ok());
    assert!(matches!(
        validate_answer(Frame::from_static(b"R/22")),
        Err(LinkError::MalformedAnswer(_))
    ));
    assert!(matches!(
        validate_answer(Frame::from_static(b"")),
        Err(LinkError::MalformedAnswer(_))
    ));
}

// =============================================================================
// Value Decoding Tests
// =============================================================================

#[test]
fn test_decode_plain_value() {
    let frame = Frame::from_static(b"A/22\\P-51");
    let value = decode_value(&frame, &codes::GET_PLANE, SKIP_PLAIN).unwrap();
    assert_eq!(to_text(value).unwrap(), "P-51");
}

#[test]
fn test_decode_indexed_values() {
    let frame = Frame::from_static(b"A/64\\0\\1850.0/66\\0\\45.2");
    let rpm = decode_value(&frame, &codes::GET_RPM, SKIP_INDEXED).unwrap();
    let manifold = decode_value(&frame, &codes::GET_MANIFOLD, SKIP_INDEXED).unwrap();
    assert_eq!(to_float(rpm).unwrap(), 1850.0);
    assert_eq!(to_float(manifold).unwrap(), 45.2);
}

#[test]
fn test_decode_indexed_by_full_code() {
    let frame = Frame::from_static(b"A/64\\1\\2400.0");
    let code = codes::GET_RPM.with_arg(1);
    let value = decode_value(&frame, &code, SKIP_INDEXED).unwrap();
    assert_eq!(value, b"2400.0");
}

#[test]
fn test_decode_value_at_end_of_frame() {
    let frame = Frame::from_static(b"A/30\\250.5/40\\1500");
    assert_eq!(decode_value(&frame, "40", SKIP_PLAIN).unwrap(), b"1500");
    assert_eq!(decode_value(&frame, "30", SKIP_PLAIN).unwrap(), b"250.5");
}

#[test]
fn test_decode_missing_code() {
    let frame = Frame::from_static(b"A/22\\P-51");
    assert!(matches!(
        decode_value(&frame, "99", SKIP_PLAIN),
        Err(LinkError::NoMatchingCode(_))
    ));
}

#[test]
fn test_decode_empty_value() {
    let frame = Frame::from_static(b"A/22\\/30\\1.0");
    assert!(matches!(
        decode_value(&frame, "22", SKIP_PLAIN),
        Err(LinkError::EmptyValue(_))
    ));
}

#[test]
fn test_decode_too_few_delimiters() {
    // plain answer decoded as if it were indexed
    let frame = Frame::from_static(b"A/22\\P-51/30\\1.0");
    assert!(matches!(
        decode_value(&frame, "22", SKIP_INDEXED),
        Err(LinkError::EmptyValue(_))
    ));

    let frame = Frame::from_static(b"A/22");
    assert!(matches!(
        decode_value(&frame, "22", SKIP_PLAIN),
        Err(LinkError::EmptyValue(_))
    ));
}

#[test]
fn test_decode_prefers_group_over_value_substring() {
    let frame = Frame::from_static(b"A/30\\140.5/40\\1000");
    assert_eq!(decode_value(&frame, "40", SKIP_PLAIN).unwrap(), b"1000");
}

#[test]
fn test_decode_falls_back_to_substring() {
    // no group for "40" exists, so the match lands inside the value of 30
    let frame = Frame::from_static(b"A/30\\140.5");
    assert_eq!(decode_value(&frame, "40", 0).unwrap(), b"40.5");
}

// =============================================================================
// Coercion Tests
// =============================================================================

#[test]
fn test_to_float() {
    assert_eq!(to_float(b"1850.0").unwrap(), 1850.0);
    assert_eq!(to_float(b"-2.5").unwrap(), -2.5);
    assert!(matches!(
        to_float(b"P-51"),
        Err(LinkError::ParseFailure { expected: "float", .. })
    ));
    assert!(to_float(b"inf").is_err());
}

#[test]
fn test_to_int() {
    assert_eq!(to_int(b"3").unwrap(), 3);
    assert_eq!(to_int(b"1.0").unwrap(), 1);
    assert!(matches!(
        to_int(b"1.5"),
        Err(LinkError::ParseFailure { expected: "int", .. })
    ));
    assert!(to_int(b"abc").is_err());
}

#[test]
fn test_to_text_rejects_invalid_utf8() {
    assert_eq!(to_text(b"4.01").unwrap(), "4.01");
    assert!(to_text(&[0xff, 0xfe]).is_err());
}

#[test]
fn test_decode_answer_without_leading_delimiter() {
    let frame = Frame::from_static(b"A64\\0\\1850.0/66\\0\\45.2");
    assert_eq!(decode_value(&frame, "64", SKIP_INDEXED).unwrap(), b"1850.0");
    assert_eq!(decode_value(&frame, "66", SKIP_INDEXED).unwrap(), b"45.2");
}

#[test]
fn test_in_range_values_survive_the_wire() {
    use devlink::Instrument;

    for &field in Instrument::ALL {
        let spec = field.spec();
        let value = spec.bounds.min.max(-90.0) + 12.25;
        let text = format!("A/{}\\{}", spec.get, format_argument(value));
        let frame = Frame::new(text);

        let decoded = to_float(decode_value(&frame, &spec.get, SKIP_PLAIN).unwrap()).unwrap();
        assert!((decoded - value).abs() < 1e-4, "{}: {} != {}", spec.name, decoded, value);
    }
}
