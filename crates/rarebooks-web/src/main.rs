fn main() {
    rarebooks_web::start();
}
