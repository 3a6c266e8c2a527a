use std::process::ExitCode;

use dragon_driver::{Argument, Parser};

fn main() -> ExitCode {
    let argument = Argument::parse();
    dragon_driver::run(argument)
}
