fn main() {
    dioxus::launch(portfolio_app::App);
}
