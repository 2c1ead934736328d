fn main() {
    bytecode::term::main()
}
