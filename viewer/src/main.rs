fn main() {
    viewer::app::bootstrap::run_viewer_app();
}
