#[tokio::main]
async fn main() {
    if let Err(e) = bitcom_peek::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
