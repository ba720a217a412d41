#[tokio::main]
async fn main() {
    if let Err(e) = healio_lib::run().await {
        eprintln!("healio: {e}");
        std::process::exit(1);
    }
}
