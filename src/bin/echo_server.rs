use tokio_udp_exchange::{ServerConfiguration, UdpServer};

#[tokio::main]
async fn main() {
    let server = UdpServer::with_configuration(ServerConfiguration::new(33333));

    server.on_data(|incoming, responder| async move {
        println!(
            "Received {:?} from {}",
            String::from_utf8_lossy(&incoming.payload),
            incoming.source
        );
        responder.reply(incoming.payload).await.unwrap();
    });
    server.on_error(|err| eprintln!("Server error: {}", err));

    let addr = server.start().await.unwrap();
    println!("Echo server listening on {}", addr);

    futures::future::pending::<()>().await;
}
