fn main() {
    std::process::exit(outline_analyzer_lib::run())
}
