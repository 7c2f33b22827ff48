fn main() {
    makiaveli::cli::run();
}
