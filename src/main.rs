#[actix_web::main]
async fn main() -> std::io::Result<()> {
    cardiaguard_lib::run().await
}
