//! Property tests: line reassembly does not depend on where chunks split.

use ndchat_stream::ChunkReassembler;
use proptest::prelude::*;

fn reassemble(payload: &[u8], cuts: &[usize]) -> Vec<String> {
    let mut reassembler = ChunkReassembler::new();
    let mut lines = Vec::new();
    let mut start = 0;
    for &cut in cuts {
        lines.extend(reassembler.feed(&payload[start..cut]));
        start = cut;
    }
    lines.extend(reassembler.feed(&payload[start..]));
    lines.extend(reassembler.finish());
    lines
}

fn sorted_cuts(len: usize, raw: Vec<usize>) -> Vec<usize> {
    let mut cuts: Vec<usize> = raw.into_iter().map(|c| c % (len + 1)).collect();
    cuts.sort_unstable();
    cuts
}

fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(|c| format!(r#"{{"type":"status","content":"{c}"}}"#)),
        "[ -~]{0,20}",
        Just("Příliš žluťoučký kůň 🐎".to_string()),
        Just("   ".to_string()),
        Just(String::new()),
    ]
}

fn arb_payload() -> impl Strategy<Value = (String, bool)> {
    (proptest::collection::vec(arb_line(), 0..8), any::<bool>()).prop_map(|(lines, crlf)| {
        let sep = if crlf { "\r\n" } else { "\n" };
        (lines.join(sep), crlf)
    })
}

proptest! {
    #[test]
    fn split_invariant(
        (payload, _crlf) in arb_payload(),
        trailing_newline in any::<bool>(),
        raw_cuts in proptest::collection::vec(any::<usize>(), 0..10),
    ) {
        let mut payload = payload.into_bytes();
        if trailing_newline {
            payload.push(b'\n');
        }
        let whole = reassemble(&payload, &[]);
        let cuts = sorted_cuts(payload.len(), raw_cuts);
        let split = reassemble(&payload, &cuts);
        prop_assert_eq!(whole, split);
    }

    #[test]
    fn every_single_byte_split_matches(line in "[ -~é✓🐎]{1,16}") {
        let payload = format!("{line}\n");
        let bytes = payload.as_bytes();
        let expected = reassemble(bytes, &[]);
        for cut in 0..=bytes.len() {
            prop_assert_eq!(&reassemble(bytes, &[cut]), &expected);
        }
    }

    #[test]
    fn no_nonblank_content_is_lost(lines in proptest::collection::vec("[a-z0-9]{1,8}", 1..6)) {
        let payload = lines.join("\n");
        let out = reassemble(payload.as_bytes(), &sorted_cuts(payload.len(), vec![3, 7, 11]));
        prop_assert_eq!(out, lines);
    }
}

#[test]
fn byte_at_a_time_multibyte() {
    let payload = "{\"type\":\"status\",\"content\":\"Hledám hotely v Praze 🏨\"}\n";
    let mut reassembler = ChunkReassembler::new();
    let mut lines = Vec::new();
    for byte in payload.as_bytes() {
        lines.extend(reassembler.feed(std::slice::from_ref(byte)));
    }
    assert!(reassembler.finish().is_none());
    assert_eq!(lines, vec![payload.trim_end().to_string()]);
}

#[test]
fn blank_lines_produce_nothing() {
    assert!(reassemble(b"\n\n   \n\t\n\r\n", &[2, 5]).is_empty());
}
