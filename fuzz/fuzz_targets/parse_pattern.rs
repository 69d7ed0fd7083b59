#![no_main]

use libfuzzer_sys::fuzz_target;

use astmatch::pattern::parse;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Errors are fine; panics are not. Anything that parses must render to
    // text that parses back to the same matcher.
    if let Ok(matcher) = parse(text) {
        let rendered = matcher.to_string();
        let reparsed = parse(&rendered).expect("rendered pattern failed to parse");
        assert_eq!(reparsed, matcher, "render of {text:?} changed meaning: {rendered}");
    }
});
