fn main() {
    gridy::run();
}
