pub fn main() -> iced::Result {
    snapsort::app::run()
}
