//! `urlintitle tags` – list format tags.

use urlintitle_core::env::Environment;
use urlintitle_core::tags::Tag;
use urlintitle_core::template;

pub fn run_tags() {
    let env = Environment::example();
    println!("{:<16} {:<28} {}", "TAG", "EXAMPLE", "DESCRIPTION");
    for tag in Tag::ALL {
        let placeholder = tag.placeholder();
        let example = template::render(&placeholder, &env);
        println!("{:<16} {:<28} {}", placeholder, example, tag.description());
    }
}
