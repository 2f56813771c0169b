// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted tag input session: typing, pasting, keyboard removal, and a
//! controlled owner accepting proposals.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example tag_input_script`

use understory_tag_input::{
    Autocomplete, BlurBehavior, Key, KeyEvent, PasteEvent, SequentialIds, Tag, TagConstraints,
    TagInput, TagInputConfig, TagInputEvent, TagStore,
};

fn show(label: &str, input: &TagInput, events: &[TagInputEvent]) {
    println!("\n== {label} ==");
    for event in events {
        println!("  event: {event:?}");
    }
    let row: Vec<String> = input
        .tag_views()
        .iter()
        .map(|v| format!("[{}]{:?}", v.display_text, v.flags))
        .collect();
    println!(
        "  tags: {}  ({})  input={:?} mode={:?}",
        row.join(" "),
        input.count_label(),
        input.input_value(),
        input.mode(),
    );
}

fn key(input: &mut TagInput, key: Key) -> Vec<TagInputEvent> {
    input.on_key_down(&mut KeyEvent::new(key))
}

fn main() {
    env_logger::init();

    let autocomplete = Autocomplete::new(vec![
        Tag::new("opt-rust", "Rust"),
        Tag::new("opt-zig", "Zig"),
        Tag::new("opt-go", "Go"),
    ]);
    let config = TagInputConfig::default()
        .with_add_on_paste(true)
        .with_blur_behavior(BlurBehavior::Add)
        .with_autocomplete(autocomplete)
        .with_placeholders("Add a language", "That's enough languages")
        .with_constraints(
            TagConstraints::default()
                .with_max_tags(4)
                .with_min_length(2)
                .with_validator(|t| !t.contains(' ')),
        );
    let store = TagStore::uncontrolled(Vec::new()).with_id_source(SequentialIds::new());
    let mut input = TagInput::new(store, config);

    // Type and commit with Enter.
    input.on_input_change("C");
    let events = key(&mut input, Key::Enter);
    show("Enter on a one-letter tag", &input, &events);

    let events = input.on_input_change("Cpp,");
    show("Typed trailing comma", &input, &events);

    // Paste splits on the delimiter.
    let events = input.on_paste(&mut PasteEvent::new("Haskell, Ocaml"));
    show("Paste two tags", &input, &events);

    let events = input.add_tag("Lua");
    show("Over capacity", &input, &events);
    println!("  placeholder: {:?}", input.placeholder());

    // Backspace twice: focus the last tag, then remove it.
    let mut events = key(&mut input, Key::Backspace);
    events.extend(key(&mut input, Key::Backspace));
    show("Backspace, Backspace", &input, &events);

    // Wander around with the arrows.
    let mut events = key(&mut input, Key::Home);
    events.extend(key(&mut input, Key::ArrowLeft));
    show("Home, ArrowLeft (wraps)", &input, &events);

    // Pick from autocomplete.
    input.on_input_change("zi");
    for s in input.suggestions() {
        println!("  suggestion #{}: {} selected={}", s.index, s.option.text, s.selected);
    }
    let events = input.select_suggestion(1);
    show("Select suggestion", &input, &events);

    // Blur with pending text adds it.
    input.on_input_change("two words");
    let events = input.on_input_blur();
    show("Blur with invalid text", &input, &events);
    println!("  invalid input: {}", input.is_invalid_input());

    // A controlled owner sees proposals and decides.
    let owned = vec![Tag::new("a", "Ada")];
    let store = TagStore::controlled(owned).with_id_source(SequentialIds::with_prefix("c"));
    let mut controlled = TagInput::new(store, TagInputConfig::default());
    controlled.on_input_change("Lisp");
    let events = key(&mut controlled, Key::Enter);
    show("Controlled: proposal pending", &controlled, &events);
    if let Some(TagInputEvent::ValueChange(next)) = events.last() {
        controlled.set_value(next.clone());
    }
    show("Controlled: owner accepted", &controlled, &[]);
}
