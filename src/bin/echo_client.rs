use std::time::Duration;
use tokio_udp_exchange::{request, request_multi, request_multi_parallel};

#[tokio::main]
async fn main() {
    let timeout = Some(Duration::from_millis(1000));

    let outcome = request("127.0.0.1", 33333, "Hello World!", timeout)
        .await
        .unwrap();
    println!(
        "Reply from {}: {:?} in {:?}",
        outcome.responder(),
        String::from_utf8_lossy(&outcome.payload),
        outcome.latency
    );

    let follow_up = outcome.reply("Hello again!").await.unwrap();
    println!(
        "Follow-up reply: {:?} in {:?}",
        String::from_utf8_lossy(&follow_up.payload),
        follow_up.latency
    );

    let outcomes = request_multi("127.0.0.1", 33333, ["one", "two", "three"], timeout)
        .await
        .unwrap();
    println!("Sequential exchanges completed: {}", outcomes.len());

    let outcomes = request_multi_parallel("127.0.0.1", 33333, ["four", "five", "six"], timeout)
        .await
        .unwrap();
    for outcome in &outcomes {
        println!(
            "Parallel exchange {:?} -> {:?}",
            String::from_utf8_lossy(&outcome.request_payload),
            String::from_utf8_lossy(&outcome.payload)
        );
    }
}
