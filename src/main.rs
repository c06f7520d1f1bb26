#[tokio::main]
async fn main() {
    if let Err(e) = langscan_lib::run().await {
        eprintln!("langscan: {e}");
        std::process::exit(1);
    }
}
