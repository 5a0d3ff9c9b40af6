//! End-to-end: byte chunks through reassembly into renderer calls.

use bytes::Bytes;
use futures::{StreamExt, stream};
use ndchat_stream::{CycleStats, EventInterpreter, ndjson_lines};
use ndchat_types::test_utils::{RecordingRenderer, RenderOp};

const PAYLOAD: &str = concat!(
    r#"{"type":"status","content":"Checking the weather in Prague"}"#,
    "\n",
    "\n",
    r#"{"type":"status","content":"Searching hotels near Old Town"}"#,
    "\n",
    "not-json\n",
    r#"{"type":"heartbeat","content":""}"#,
    "\n",
    r#"{"type":"response","content":"**Sunny**, and three hotels found 🏨"}"#,
);

async fn drive(chunks: Vec<Bytes>) -> (RecordingRenderer, CycleStats) {
    let mut renderer = RecordingRenderer::new();
    let mut interpreter = EventInterpreter::new(&mut renderer);
    let mut lines = std::pin::pin!(ndjson_lines(stream::iter(
        chunks.into_iter().map(Ok::<_, std::io::Error>)
    )));
    while let Some(line) = lines.next().await {
        interpreter.handle_line(&line.expect("no transport errors"));
    }
    let stats = interpreter.finish();
    (renderer, stats)
}

fn split_every(payload: &[u8], size: usize) -> Vec<Bytes> {
    payload
        .chunks(size)
        .map(Bytes::copy_from_slice)
        .collect()
}

#[tokio::test]
async fn full_cycle_single_chunk() {
    let (r, stats) = drive(vec![Bytes::from_static(PAYLOAD.as_bytes())]).await;

    assert_eq!(r.placeholders.len(), 1);
    assert_eq!(r.placeholders[0].content, "Searching hotels near Old Town");
    assert!(r.placeholders[0].finalized);
    assert_eq!(
        r.final_messages(),
        vec!["**Sunny**, and three hotels found 🏨"]
    );
    assert_eq!(
        stats,
        CycleStats {
            placeholders_created: 1,
            status_updates: 2,
            final_messages: 1,
            malformed_lines: 1,
            unrecognized_events: 1,
        }
    );
}

#[tokio::test]
async fn render_ops_identical_for_any_chunk_size() {
    let (reference, reference_stats) = drive(vec![Bytes::from_static(PAYLOAD.as_bytes())]).await;
    for size in [1, 2, 3, 5, 7, 16, 64] {
        let (r, stats) = drive(split_every(PAYLOAD.as_bytes(), size)).await;
        assert_eq!(r.ops, reference.ops, "chunk size {size}");
        assert_eq!(stats, reference_stats, "chunk size {size}");
    }
}

#[tokio::test]
async fn ops_follow_state_machine_order() {
    let (r, _) = drive(split_every(PAYLOAD.as_bytes(), 9)).await;
    assert_eq!(
        r.ops,
        vec![
            RenderOp::CreatePlaceholder(0),
            RenderOp::UpdatePlaceholder {
                index: 0,
                content: "Checking the weather in Prague".into(),
            },
            RenderOp::UpdatePlaceholder {
                index: 0,
                content: "Searching hotels near Old Town".into(),
            },
            RenderOp::FinalizePlaceholder(0),
            RenderOp::FinalMessage {
                content: "**Sunny**, and three hotels found 🏨".into(),
                rich_text: true,
            },
        ]
    );
}

#[tokio::test]
async fn each_cycle_starts_without_placeholder() {
    let mut renderer = RecordingRenderer::new();
    for round in 0..2 {
        let mut interpreter = EventInterpreter::new(&mut renderer);
        interpreter.handle_line(&format!(r#"{{"type":"status","content":"round {round}"}}"#));
        interpreter.handle_line(r#"{"type":"response","content":"ok"}"#);
        interpreter.finish();
    }
    assert_eq!(renderer.placeholders.len(), 2);
    assert!(renderer.placeholders.iter().all(|p| p.finalized));
    assert_eq!(renderer.placeholders[1].content, "round 1");
}

#[tokio::test]
async fn whitespace_only_stream_produces_no_events() {
    let (r, stats) = drive(vec![Bytes::from_static(b"\n  \n\r\n\t")]).await;
    assert!(r.ops.is_empty());
    assert_eq!(stats, CycleStats::default());
}
