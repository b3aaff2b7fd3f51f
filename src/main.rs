#[tokio::main]
async fn main() {
    hotel_session::run().await;
}
