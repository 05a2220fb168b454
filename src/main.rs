fn main() {
    card_grader_lib::run()
}
