#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
// The ultimate strictness: catches things like missing documentation or overflow risks
#![warn(clippy::restriction)]

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    raksha::run().await
}
