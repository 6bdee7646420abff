//! Demo client driving the toolbus protocol end to end.
//!
//! Connects to a running server, lists the available tools, sends a chat
//! message, then calls each built-in tool, printing every response.

use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

/// Demo client for the toolbus server.
#[derive(Parser)]
#[command(name = "toolbus-client", version, about, long_about = None)]
struct Cli {
    /// WebSocket endpoint to connect to.
    #[arg(long, default_value = "ws://localhost:8000/ws")]
    url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (socket, _response) = connect_async(cli.url.as_str()).await?;
    println!("Connected to {}", cli.url);
    let (mut sender, mut receiver) = socket.split();

    let requests = [
        ("Available tools", json!({"type": "list_tools"})),
        (
            "Message response",
            json!({"type": "message", "message": "Hello from the demo client"}),
        ),
        (
            "Echo tool response",
            json!({"type": "tool", "tool": "echo", "parameters": {"message": "Testing echo tool"}}),
        ),
        (
            "Time tool response",
            json!({"type": "tool", "tool": "get_time", "parameters": {}}),
        ),
        (
            "Calculator tool response",
            json!({"type": "tool", "tool": "calculate", "parameters": {"operation": "add", "a": 5, "b": 3}}),
        ),
    ];

    for (label, request) in requests {
        sender
            .send(Message::Text(request.to_string().into()))
            .await?;

        // The protocol is strictly request/response: the next text frame is
        // the answer to what we just sent.
        let response = loop {
            match receiver.next().await {
                Some(Ok(Message::Text(text))) => break text,
                Some(Ok(_)) => continue,
                Some(Err(err)) => return Err(err.into()),
                None => anyhow::bail!("server closed the connection"),
            }
        };

        let pretty: serde_json::Value = serde_json::from_str(&response)?;
        println!("\n{label}:");
        println!("{}", serde_json::to_string_pretty(&pretty)?);
    }

    Ok(())
}
